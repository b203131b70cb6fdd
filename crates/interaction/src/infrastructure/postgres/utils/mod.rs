mod postgres_migrations;

pub use postgres_migrations::run_interaction_postgres_migrations;
