mod ids;
mod track;

pub use ids::VideoId;
pub use track::{CandidateTrack, QueueItem};
