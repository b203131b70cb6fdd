// crates/interaction/src/domain/value_objects/counter_field.rs

/// Les trois compteurs d'une interaction. Le nom de champ est partagé
/// entre la colonne Postgres et le champ du hash Redis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CounterField {
    Read,
    Like,
    Collect,
}

impl CounterField {
    pub const ALL: [CounterField; 3] = [Self::Read, Self::Like, Self::Collect];

    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Read => "read_cnt",
            Self::Like => "like_cnt",
            Self::Collect => "collect_cnt",
        }
    }
}
