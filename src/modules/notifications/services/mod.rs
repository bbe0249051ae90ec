pub mod change_detector;

pub use change_detector::ChangeDetector;
