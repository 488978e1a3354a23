//! Camera session management
//!
//! The heart of the server: one owned, switchable capture device behind a
//! single exclusive lock, plus the process-wide activity gate.
//!
//! ```text
//!                    Arc<CameraSession>
//!              +---------------------------+
//!              | slot: Mutex<Option<       |
//!              |   FrameSource>>           |
//!              | active: AtomicBool        |
//!              +---------------------------+
//!                 ^          ^          ^
//!                 |          |          |
//!          [/video task] [/video task] [switch handler]
//!           read_frame    read_frame    open(device)
//! ```
//!
//! `open` and `read_frame` both hold the slot lock for their full duration,
//! so a device switch atomically closes the old source and commits the new
//! one without any reader observing an intermediate state. The activity
//! flag never takes that lock; streaming loops poll it once per frame.

pub mod camera;

pub use camera::CameraSession;
