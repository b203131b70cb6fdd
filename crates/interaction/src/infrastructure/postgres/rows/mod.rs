mod postgres_interaction_rows;

pub use postgres_interaction_rows::{
    PostgresCollectRecordRow, PostgresInteractionCounterRow, PostgresLikeStatusRow,
};
