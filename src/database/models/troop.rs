use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Troop {
    pub id: Uuid,
    pub name: String,
    pub workspace_id: Uuid,
}

/// Many-to-many link between troops and the events they attend
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TroopParticipation {
    pub troop_id: Uuid,
    pub event_id: Uuid,
}
