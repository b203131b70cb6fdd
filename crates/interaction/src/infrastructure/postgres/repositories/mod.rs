mod postgres_interaction_store;

pub use postgres_interaction_store::PostgresInteractionStore;
