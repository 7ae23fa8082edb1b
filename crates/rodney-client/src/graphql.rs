//! GraphQL documents, request building, and response decoding.

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use rodney_core::{ActionKind, ColumnDescriptor, Field, MutationRequest, NAME_COLUMN_ID};
use rodney_dispatch::{RecordFields, RemoteError};

// -- Documents ---------------------------------------------------------------

const ITEM_FIELDS: &str = "query ($itemId: ID!) { items(ids: [$itemId]) { id name column_values { id title text value } } }";

const BOARD_COLUMNS: &str =
    "query ($boardId: ID!) { boards(ids: [$boardId]) { columns { id title type } } }";

const CHANGE_COLUMN_VALUE: &str = "mutation ($itemId: ID!, $boardId: ID!, $columnId: String!, $value: String!) { change_simple_column_value(item_id: $itemId, board_id: $boardId, column_id: $columnId, value: $value) { id } }";

const DUPLICATE_ITEM: &str =
    "mutation ($itemId: ID!, $boardId: ID!) { duplicate_item(item_id: $itemId, board_id: $boardId) { id } }";

const CREATE_SUBITEM: &str =
    "mutation ($parentId: ID!, $name: String!) { create_subitem(parent_item_id: $parentId, item_name: $name) { id } }";

/// A GraphQL request body: a static document plus its variables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphqlRequest {
    pub query: &'static str,
    pub variables: Value,
}

impl GraphqlRequest {
    /// Fetch an item's name and column values.
    pub fn item_fields(item_id: &str) -> Self {
        Self {
            query: ITEM_FIELDS,
            variables: json!({ "itemId": item_id }),
        }
    }

    /// Fetch a board's column descriptors.
    pub fn board_columns(board_id: &str) -> Self {
        Self {
            query: BOARD_COLUMNS,
            variables: json!({ "boardId": board_id }),
        }
    }

    /// Map a single mutation request onto its document.
    ///
    /// Subitem plans are rejected; send each child separately.
    pub fn from_mutation(request: &MutationRequest) -> Result<Self, RemoteError> {
        if request.is_plan() {
            return Err(RemoteError::Rejected(
                "subitem plans must be expanded before sending".into(),
            ));
        }

        let req = match request.operation {
            ActionKind::Rename | ActionKind::UpdateField => {
                let column = request
                    .target_field_id
                    .as_deref()
                    .filter(|id| !id.is_empty())
                    .or((request.operation == ActionKind::Rename).then_some(NAME_COLUMN_ID))
                    .ok_or_else(|| RemoteError::Rejected("missing target column".into()))?;
                Self {
                    query: CHANGE_COLUMN_VALUE,
                    variables: json!({
                        "itemId": request.record_id,
                        "boardId": request.collection_id,
                        "columnId": column,
                        "value": request.payload,
                    }),
                }
            }
            ActionKind::Duplicate => Self {
                query: DUPLICATE_ITEM,
                variables: json!({
                    "itemId": request.record_id,
                    "boardId": request.collection_id,
                }),
            },
            ActionKind::CreateSubitems => Self {
                query: CREATE_SUBITEM,
                variables: json!({
                    "parentId": request.record_id,
                    "name": request.payload,
                }),
            },
        };
        Ok(req)
    }
}

// -- Responses ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ItemsData {
    #[serde(default)]
    items: Vec<ItemNode>,
}

#[derive(Debug, Deserialize)]
struct ItemNode {
    name: String,
    #[serde(default)]
    column_values: Vec<ColumnValueNode>,
}

#[derive(Debug, Deserialize)]
struct ColumnValueNode {
    id: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    value: Option<Value>,
}

impl From<ColumnValueNode> for Field {
    fn from(node: ColumnValueNode) -> Self {
        let raw_value = match node.value {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        };
        Field {
            title: node.title.unwrap_or_else(|| node.id.clone()),
            id: node.id,
            text: node.text,
            raw_value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BoardsData {
    #[serde(default)]
    boards: Vec<BoardNode>,
}

#[derive(Debug, Deserialize)]
struct BoardNode {
    #[serde(default)]
    columns: Vec<ColumnDescriptor>,
}

/// Unwrap the `data` member of a response, turning reported errors into
/// [`RemoteError::Remote`].
pub fn decode_data<T: DeserializeOwned>(body: Value) -> Result<T, RemoteError> {
    let envelope: Envelope =
        serde_json::from_value(body).map_err(|e| RemoteError::Decode(e.to_string()))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope.errors.iter().map(|e| e.message.as_str()).collect();
        return Err(RemoteError::Remote(messages.join("; ")));
    }
    if let Some(message) = envelope.error_message {
        return Err(RemoteError::Remote(message));
    }

    let data = envelope
        .data
        .ok_or_else(|| RemoteError::Decode("response has no data".into()))?;
    serde_json::from_value(data).map_err(|e| RemoteError::Decode(e.to_string()))
}

/// Decode an `items` query response.
pub fn decode_item_fields(body: Value, item_id: &str) -> Result<RecordFields, RemoteError> {
    let data: ItemsData = decode_data(body)?;
    let item = data
        .items
        .into_iter()
        .next()
        .ok_or_else(|| RemoteError::Decode(format!("item {item_id} not found")))?;
    Ok(RecordFields {
        name: item.name,
        fields: item.column_values.into_iter().map(Field::from).collect(),
    })
}

/// Decode a `boards` query response.
pub fn decode_board_columns(
    body: Value,
    board_id: &str,
) -> Result<Vec<ColumnDescriptor>, RemoteError> {
    let data: BoardsData = decode_data(body)?;
    data.boards
        .into_iter()
        .next()
        .map(|board| board.columns)
        .ok_or_else(|| RemoteError::Decode(format!("board {board_id} not found")))
}

/// Check a mutation response for errors; the returned data is not used.
pub fn decode_mutation(body: Value) -> Result<(), RemoteError> {
    decode_data::<Value>(body).map(|_| ())
}
