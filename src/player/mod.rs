// Media transport: the controller, its state pieces, and the media
// elements it can drive.

pub mod audio;
pub mod clock;
pub mod media;
pub mod press;
pub mod queue;
pub mod seek;
pub mod transport;
pub mod volume;

pub use media::{MediaElement, MediaEvent};
pub use queue::{Track, TrackList};
pub use transport::{PlaybackPhase, Transport, TransportProfile, TransportState};
