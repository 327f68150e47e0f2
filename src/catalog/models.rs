//! Normalized catalog records.
//!
//! ServiceNow returns records whose field values are strings, numbers,
//! booleans or reference objects depending on the endpoint and the
//! `sysparm_display_value` setting. The models here flatten all of that into
//! plain strings and flags, and rebuild the container hierarchy of catalog
//! item variables.
//!
//! # Variable hierarchy
//!
//! The Service Catalog API either nests a container's variables under its
//! `children` member or emits a flat list bracketed by *Container Start* and
//! *Container End* variables. [`normalize_variables`] accepts both and always
//! produces the nested form, with end markers removed.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// Render a raw field value as a display string.
///
/// Missing and `null` become `""`. Reference objects yield their
/// `display_value`, falling back to `title`, `name`, `value`, `sys_id`.
pub fn display_string(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Object(map)) => ["display_value", "title", "name", "value", "sys_id"]
            .iter()
            .find_map(|key| map.get(*key).filter(|v| !v.is_null()))
            .map(|v| display_string(Some(v)))
            .unwrap_or_default(),
        Some(other @ Value::Array(_)) => other.to_string(),
    }
}

/// Interpret a raw field value as a boolean flag (`true`, `"true"`, `1`, `"1"`).
pub fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
        Some(Value::String(s)) => {
            matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes")
        }
        _ => false,
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => {
            let s = s.trim().replace(',', "");
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f as i64))
        }
        _ => None,
    }
}

fn field(record: &Value, key: &str) -> String {
    display_string(record.get(key))
}

pub(crate) fn first_field(record: &Value, keys: &[&str]) -> String {
    keys.iter()
        .map(|key| field(record, key))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// A row of the `sc_category` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogCategoryModel {
    pub sys_id: String,
    pub title: String,
    pub description: String,
    /// Parent category (display value)
    pub parent: String,
    pub icon: String,
    pub active: String,
    pub order: String,
}

impl CatalogCategoryModel {
    pub fn from_record(record: &Value) -> Self {
        Self {
            sys_id: field(record, "sys_id"),
            title: field(record, "title"),
            description: field(record, "description"),
            parent: field(record, "parent"),
            icon: field(record, "icon"),
            active: field(record, "active"),
            order: field(record, "order"),
        }
    }
}

/// A row of the `sc_cat_item` table as returned by list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItemModel {
    pub sys_id: String,
    pub name: String,
    pub short_description: String,
    /// Category (display value)
    pub category: String,
    pub price: String,
    pub picture: String,
    pub active: String,
    pub order: String,
}

impl CatalogItemModel {
    pub fn from_record(record: &Value) -> Self {
        Self {
            sys_id: field(record, "sys_id"),
            name: field(record, "name"),
            short_description: field(record, "short_description"),
            category: field(record, "category"),
            price: field(record, "price"),
            picture: field(record, "picture"),
            active: field(record, "active"),
            order: field(record, "order"),
        }
    }
}

/// A single catalog item with its variables, from the Service Catalog API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItemDetailModel {
    pub sys_id: String,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub picture: String,
    pub active: String,
    pub order: String,
    pub delivery_time: String,
    pub availability: String,
    pub mandatory_attachment: String,
    pub variables: Vec<CatalogItemVariableModel>,
    /// Raw `ui_policy` member, passed through untouched
    pub ui_policies: Value,
    /// Raw `client_script` member, passed through untouched
    pub client_scripts: Value,
}

impl CatalogItemDetailModel {
    pub fn from_record(record: &Value) -> Self {
        let variables = record
            .get("variables")
            .and_then(Value::as_array)
            .map(|raw| normalize_variables(raw))
            .unwrap_or_default();

        Self {
            sys_id: field(record, "sys_id"),
            name: field(record, "name"),
            short_description: field(record, "short_description"),
            description: field(record, "description"),
            category: field(record, "category"),
            price: field(record, "price"),
            picture: field(record, "picture"),
            active: field(record, "active"),
            order: field(record, "order"),
            delivery_time: field(record, "delivery_time"),
            availability: field(record, "availability"),
            mandatory_attachment: field(record, "mandatory_attachment"),
            variables,
            ui_policies: record.get("ui_policy").cloned().unwrap_or(Value::Null),
            client_scripts: record.get("client_script").cloned().unwrap_or(Value::Null),
        }
    }

    /// Number of variables at every nesting depth.
    pub fn variable_count(&self) -> usize {
        fn count(vars: &[CatalogItemVariableModel]) -> usize {
            vars.iter().map(|v| 1 + count(&v.children)).sum()
        }
        count(&self.variables)
    }
}

/// A form field or layout container attached to a catalog item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItemVariableModel {
    pub id: String,
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub variable_type: VariableType,
    pub mandatory: bool,
    pub read_only: bool,
    pub help_text: String,
    pub default_value: String,
    pub display_value: String,
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnModel>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CatalogItemVariableModel>,
}

impl CatalogItemVariableModel {
    /// Normalize one raw variable. Nested `children` are normalized
    /// recursively; flat container folding happens in [`normalize_variables`].
    pub fn from_record(record: &Value) -> Self {
        let mut choices: Vec<ChoiceModel> = record
            .get("choices")
            .and_then(Value::as_array)
            .map(|raw| raw.iter().map(ChoiceModel::from_record).collect())
            .unwrap_or_default();
        if choices.iter().all(|c| c.index.is_some()) {
            choices.sort_by_key(|c| c.index);
        }

        let columns = ["columns", "fields"]
            .iter()
            .find_map(|key| record.get(*key).and_then(Value::as_array))
            .map(|raw| raw.iter().map(ColumnModel::from_record).collect())
            .unwrap_or_default();

        let children = record
            .get("children")
            .and_then(Value::as_array)
            .map(|raw| normalize_variables(raw))
            .unwrap_or_default();

        Self {
            id: first_field(record, &["id", "sys_id"]),
            name: field(record, "name"),
            label: first_field(record, &["label", "question_text"]),
            variable_type: VariableType::from_record(record),
            mandatory: flag(record.get("mandatory")),
            read_only: flag(record.get("read_only")),
            help_text: field(record, "help_text"),
            default_value: first_field(record, &["default_value", "value"]),
            display_value: first_field(record, &["displayvalue", "display_value"]),
            order: integer(record.get("order")),
            choices,
            columns,
            children,
        }
    }

    pub fn is_container(&self) -> bool {
        self.variable_type == VariableType::ContainerStart
    }
}

/// One selectable option of a choice-style variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceModel {
    pub label: String,
    pub value: String,
    pub index: Option<i64>,
    pub price: String,
    pub recurring_price: String,
}

impl ChoiceModel {
    pub fn from_record(record: &Value) -> Self {
        Self {
            label: first_field(record, &["label", "text"]),
            value: field(record, "value"),
            index: integer(record.get("index")),
            price: field(record, "price"),
            recurring_price: field(record, "recurring_price"),
        }
    }
}

/// A column of a list collector or multi-row variable set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnModel {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: VariableType,
    pub mandatory: bool,
}

impl ColumnModel {
    pub fn from_record(record: &Value) -> Self {
        Self {
            name: first_field(record, &["name", "element"]),
            label: first_field(record, &["label", "column_label"]),
            column_type: VariableType::from_record(record),
            mandatory: flag(record.get("mandatory")),
        }
    }
}

/// Fold a raw variable list into its container hierarchy.
///
/// A *Container Start* without its own `children` member opens a container
/// that collects every following variable until the matching *Container
/// End*. End markers are dropped; an end marker with no open container is
/// ignored and containers still open at the end are closed.
pub fn normalize_variables(raw: &[Value]) -> Vec<CatalogItemVariableModel> {
    fn attach(
        open: &mut [CatalogItemVariableModel],
        top: &mut Vec<CatalogItemVariableModel>,
        variable: CatalogItemVariableModel,
    ) {
        match open.last_mut() {
            Some(parent) => parent.children.push(variable),
            None => top.push(variable),
        }
    }

    let mut top = Vec::new();
    let mut open: Vec<CatalogItemVariableModel> = Vec::new();

    for record in raw {
        let variable = CatalogItemVariableModel::from_record(record);
        match variable.variable_type {
            VariableType::ContainerStart if record.get("children").is_none() => {
                open.push(variable);
            }
            VariableType::ContainerEnd => {
                if let Some(closed) = open.pop() {
                    attach(&mut open, &mut top, closed);
                }
            }
            _ => attach(&mut open, &mut top, variable),
        }
    }

    while let Some(closed) = open.pop() {
        attach(&mut open, &mut top, closed);
    }

    top
}

/// ServiceNow catalog variable types (`item_option_new.type`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum VariableType {
    YesNo,
    MultiLineText,
    MultipleChoice,
    NumericScale,
    SelectBox,
    SingleLineText,
    CheckBox,
    Reference,
    Date,
    DateTime,
    Label,
    Break,
    Macro,
    UiPage,
    WideSingleLineText,
    MacroWithLabel,
    LookupSelectBox,
    ContainerStart,
    ContainerEnd,
    ListCollector,
    LookupMultipleChoice,
    Html,
    ContainerSplit,
    Masked,
    Email,
    Url,
    IpAddress,
    Duration,
    RequestedFor,
    RichTextLabel,
    Attachment,
    /// Numeric code this crate does not know
    Unknown(u32),
    /// Type name this crate does not know
    Other(String),
    #[default]
    Unspecified,
}

const KNOWN_TYPES: [VariableType; 31] = [
    VariableType::YesNo,
    VariableType::MultiLineText,
    VariableType::MultipleChoice,
    VariableType::NumericScale,
    VariableType::SelectBox,
    VariableType::SingleLineText,
    VariableType::CheckBox,
    VariableType::Reference,
    VariableType::Date,
    VariableType::DateTime,
    VariableType::Label,
    VariableType::Break,
    VariableType::Macro,
    VariableType::UiPage,
    VariableType::WideSingleLineText,
    VariableType::MacroWithLabel,
    VariableType::LookupSelectBox,
    VariableType::ContainerStart,
    VariableType::ContainerEnd,
    VariableType::ListCollector,
    VariableType::LookupMultipleChoice,
    VariableType::Html,
    VariableType::ContainerSplit,
    VariableType::Masked,
    VariableType::Email,
    VariableType::Url,
    VariableType::IpAddress,
    VariableType::Duration,
    VariableType::RequestedFor,
    VariableType::RichTextLabel,
    VariableType::Attachment,
];

impl VariableType {
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::YesNo,
            2 => Self::MultiLineText,
            3 => Self::MultipleChoice,
            4 => Self::NumericScale,
            5 => Self::SelectBox,
            6 => Self::SingleLineText,
            7 => Self::CheckBox,
            8 => Self::Reference,
            9 => Self::Date,
            10 => Self::DateTime,
            11 => Self::Label,
            12 => Self::Break,
            14 => Self::Macro,
            15 => Self::UiPage,
            16 => Self::WideSingleLineText,
            17 => Self::MacroWithLabel,
            18 => Self::LookupSelectBox,
            19 => Self::ContainerStart,
            20 => Self::ContainerEnd,
            21 => Self::ListCollector,
            22 => Self::LookupMultipleChoice,
            23 => Self::Html,
            24 => Self::ContainerSplit,
            25 => Self::Masked,
            26 => Self::Email,
            27 => Self::Url,
            28 => Self::IpAddress,
            29 => Self::Duration,
            31 => Self::RequestedFor,
            32 => Self::RichTextLabel,
            33 => Self::Attachment,
            other => Self::Unknown(other),
        }
    }

    /// ServiceNow numeric code, if this is a known or numbered type.
    pub fn code(&self) -> Option<u32> {
        let code = match self {
            Self::YesNo => 1,
            Self::MultiLineText => 2,
            Self::MultipleChoice => 3,
            Self::NumericScale => 4,
            Self::SelectBox => 5,
            Self::SingleLineText => 6,
            Self::CheckBox => 7,
            Self::Reference => 8,
            Self::Date => 9,
            Self::DateTime => 10,
            Self::Label => 11,
            Self::Break => 12,
            Self::Macro => 14,
            Self::UiPage => 15,
            Self::WideSingleLineText => 16,
            Self::MacroWithLabel => 17,
            Self::LookupSelectBox => 18,
            Self::ContainerStart => 19,
            Self::ContainerEnd => 20,
            Self::ListCollector => 21,
            Self::LookupMultipleChoice => 22,
            Self::Html => 23,
            Self::ContainerSplit => 24,
            Self::Masked => 25,
            Self::Email => 26,
            Self::Url => 27,
            Self::IpAddress => 28,
            Self::Duration => 29,
            Self::RequestedFor => 31,
            Self::RichTextLabel => 32,
            Self::Attachment => 33,
            Self::Unknown(code) => *code,
            Self::Other(_) | Self::Unspecified => return None,
        };
        Some(code)
    }

    /// snake_case name used in serialized output.
    pub fn name(&self) -> &str {
        match self {
            Self::YesNo => "yes_no",
            Self::MultiLineText => "multi_line_text",
            Self::MultipleChoice => "multiple_choice",
            Self::NumericScale => "numeric_scale",
            Self::SelectBox => "select_box",
            Self::SingleLineText => "single_line_text",
            Self::CheckBox => "checkbox",
            Self::Reference => "reference",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::Label => "label",
            Self::Break => "break",
            Self::Macro => "macro",
            Self::UiPage => "ui_page",
            Self::WideSingleLineText => "wide_single_line_text",
            Self::MacroWithLabel => "macro_with_label",
            Self::LookupSelectBox => "lookup_select_box",
            Self::ContainerStart => "container_start",
            Self::ContainerEnd => "container_end",
            Self::ListCollector => "list_collector",
            Self::LookupMultipleChoice => "lookup_multiple_choice",
            Self::Html => "html",
            Self::ContainerSplit => "container_split",
            Self::Masked => "masked",
            Self::Email => "email",
            Self::Url => "url",
            Self::IpAddress => "ip_address",
            Self::Duration => "duration",
            Self::RequestedFor => "requested_for",
            Self::RichTextLabel => "rich_text_label",
            Self::Attachment => "attachment",
            Self::Unknown(_) => "unknown",
            Self::Other(name) => name,
            Self::Unspecified => "unspecified",
        }
    }

    /// Parse a friendly type name such as `"select_box"`, `"Select Box"` or
    /// `"Date/Time"`.
    pub fn from_name(name: &str) -> Self {
        let normalized = normalize_type_name(name);
        let aliased = match normalized.as_str() {
            "boolean" | "check_box" => "checkbox",
            "yesno" => "yes_no",
            "custom" => "macro",
            "custom_with_label" => "macro_with_label",
            "datetime" => "date_time",
            other => other,
        };
        if aliased.is_empty() || aliased == "unspecified" {
            return Self::Unspecified;
        }
        KNOWN_TYPES
            .iter()
            .find(|t| t.name() == aliased)
            .cloned()
            .unwrap_or_else(|| Self::Other(aliased.to_string()))
    }

    /// Parse a raw `type` member: a number, a numeric string or a name.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().map(|code| {
                u32::try_from(code)
                    .map(Self::from_code)
                    .unwrap_or_else(|_| Self::Other(code.to_string()))
            }),
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    None
                } else if let Ok(code) = s.parse::<u32>() {
                    Some(Self::from_code(code))
                } else {
                    Some(Self::from_name(s))
                }
            }
            Value::Object(_) => {
                let display = display_string(Some(value));
                Self::from_json(&Value::String(display))
            }
            _ => None,
        }
    }

    /// Resolve the type of a raw variable from `type`, falling back to
    /// `friendly_type` when `type` is missing or unrecognized.
    pub fn from_record(record: &Value) -> Self {
        let primary = record.get("type").and_then(Self::from_json);
        let friendly = record.get("friendly_type").and_then(Self::from_json);
        match (primary, friendly) {
            (Some(t), _) if t.is_known() => t,
            (_, Some(f)) if f.is_known() => f,
            (Some(t), _) => t,
            (None, Some(f)) => f,
            (None, None) => Self::Unspecified,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_) | Self::Other(_) | Self::Unspecified)
    }
}

fn normalize_type_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.ends_with('_') && !out.is_empty() {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown({})", code),
            other => f.write_str(other.name()),
        }
    }
}

impl Serialize for VariableType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for VariableType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        if let Some(code) = raw
            .as_str()
            .and_then(|s| s.strip_prefix("unknown("))
            .and_then(|s| s.strip_suffix(')'))
            .and_then(|s| s.parse::<u32>().ok())
        {
            return Ok(Self::Unknown(code));
        }
        Ok(Self::from_json(&raw).unwrap_or_default())
    }
}
