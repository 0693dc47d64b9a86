use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::repository::schema::todos)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: i32,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row about to be inserted. The store assigns the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::repository::schema::todos)]
pub struct NewTodo {
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    /// `title` is expected to be validated and trimmed already.
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            title,
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Raw request body. Only JSON objects deserialize into it, the fields are
/// read and type-checked by the handlers so a missing field and a field of
/// the wrong JSON type both end up as validation errors.
pub type JsonObject = Map<String, Value>;

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SuccessResponse {
    pub success: bool,
}
