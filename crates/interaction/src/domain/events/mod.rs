mod read_event;

pub use read_event::ReadEvent;
