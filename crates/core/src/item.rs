//! Item model - the polymorphic assessment item family.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The recognized item shapes, keyed by their wire tag.
///
/// The content store emits camelCase tags; `from_loose_tag` additionally
/// accepts the casing and punctuation variants seen in authored files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    /// Single best answer from a list of options
    MultipleChoice,
    /// Select all options that apply
    SelectAll,
    /// Select exactly N options
    SelectN,
    /// Highlight spans within a passage
    Highlight,
    /// Place options in the correct order
    Ordering,
    /// Match rows against columns
    Matrix,
    /// Fill blanks from per-blank dropdowns
    Cloze,
    /// Drag tokens into blanks
    DragAndDrop,
    /// Causes and interventions around a condition
    Bowtie,
    /// Interpret a trend over time
    Trend,
    /// Choose the priority action
    PriorityAction,
    /// Mark regions on an image
    Hotspot,
    /// Choose among graphic options
    GraphicOptions,
    /// Choose after reviewing audio/video
    AudioVideo,
    /// Choose after reviewing a chart exhibit
    ChartExhibit,
}

impl ItemKind {
    /// Every recognized kind, in registry order.
    pub const ALL: [ItemKind; 15] = [
        ItemKind::MultipleChoice,
        ItemKind::SelectAll,
        ItemKind::SelectN,
        ItemKind::Highlight,
        ItemKind::Ordering,
        ItemKind::Matrix,
        ItemKind::Cloze,
        ItemKind::DragAndDrop,
        ItemKind::Bowtie,
        ItemKind::Trend,
        ItemKind::PriorityAction,
        ItemKind::Hotspot,
        ItemKind::GraphicOptions,
        ItemKind::AudioVideo,
        ItemKind::ChartExhibit,
    ];

    /// The canonical wire tag.
    pub fn tag(&self) -> &'static str {
        match self {
            ItemKind::MultipleChoice => "multipleChoice",
            ItemKind::SelectAll => "selectAll",
            ItemKind::SelectN => "selectN",
            ItemKind::Highlight => "highlight",
            ItemKind::Ordering => "ordering",
            ItemKind::Matrix => "matrix",
            ItemKind::Cloze => "cloze",
            ItemKind::DragAndDrop => "dragAndDrop",
            ItemKind::Bowtie => "bowtie",
            ItemKind::Trend => "trend",
            ItemKind::PriorityAction => "priorityAction",
            ItemKind::Hotspot => "hotspot",
            ItemKind::GraphicOptions => "graphicOptions",
            ItemKind::AudioVideo => "audioVideo",
            ItemKind::ChartExhibit => "chartExhibit",
        }
    }

    /// Resolve an exact canonical tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.tag() == tag)
    }

    /// Resolve a tag tolerating casing and punctuation variants
    /// ("multiple_choice", "Select-All") plus the handful of shorthand
    /// spellings seen in authored banks.
    pub fn from_loose_tag(tag: &str) -> Option<Self> {
        let folded = fold_tag(tag);
        if folded.is_empty() {
            return None;
        }
        match folded.as_str() {
            "mcq" | "sba" => return Some(ItemKind::MultipleChoice),
            "sata" | "multiselect" => return Some(ItemKind::SelectAll),
            "dnd" | "draganddropcloze" => return Some(ItemKind::DragAndDrop),
            "sequencing" => return Some(ItemKind::Ordering),
            "matrixmatch" => return Some(ItemKind::Matrix),
            _ => {}
        }
        Self::ALL.iter().copied().find(|k| fold_tag(k.tag()) == folded)
    }

    /// Whether this kind carries a single `correctOptionId` over a flat
    /// option list (the dichotomous-eligible family).
    pub fn is_simple_choice(&self) -> bool {
        matches!(
            self,
            ItemKind::MultipleChoice
                | ItemKind::PriorityAction
                | ItemKind::Trend
                | ItemKind::GraphicOptions
                | ItemKind::AudioVideo
                | ItemKind::ChartExhibit
        )
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string names no recognized kind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized item type tag: {0}")]
pub struct UnknownKind(pub String);

impl std::str::FromStr for ItemKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownKind(s.to_string()))
    }
}

fn fold_tag(tag: &str) -> String {
    tag.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' ' | '.'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOption {
    /// Stable option identifier
    pub id: String,
    /// Display text
    pub text: String,
}

impl ItemOption {
    /// Convenience constructor.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// One cloze blank with its dropdown choices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blank {
    /// Blank identifier, referenced by a `{{id}}` placeholder in the template
    pub id: String,
    /// Choices offered for this blank
    pub options: Vec<String>,
    /// The correct choice, drawn from `options`
    pub correct_option: String,
}

/// A matrix row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixRow {
    /// Row identifier
    pub id: String,
    /// Row label
    pub label: String,
}

/// A matrix column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixColumn {
    /// Column identifier
    pub id: String,
    /// Column label
    pub label: String,
}

/// One correct row/column pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixMatch {
    /// Row identifier
    pub row_id: String,
    /// Column identifier
    pub column_id: String,
}

/// One node on either side of a bowtie diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowtieNode {
    /// Node identifier
    pub id: String,
    /// Node text
    pub text: String,
}

/// One selectable region on an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotspotRegion {
    /// Region identifier
    pub id: String,
    /// Region label
    pub label: String,
}

/// One timestamped vitals reading in an embedded clinical timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalsEntry {
    /// 24-hour clock time, strict `HH:mm`
    pub time: String,
    /// The reading, e.g. "HR 104"
    pub reading: String,
}

/// Options plus a single correct id; the simple-choice payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceBody {
    /// Selectable options
    pub options: Vec<ItemOption>,
    /// Identifier of the correct option
    pub correct_option_id: String,
    /// Media reference for exhibit-backed shapes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exhibit: Option<String>,
}

/// Options plus a set of correct ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiBody {
    /// Selectable options
    pub options: Vec<ItemOption>,
    /// Identifiers of all correct options
    pub correct_option_ids: Vec<String>,
}

/// Options, correct ids, and the exact number to select.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectNBody {
    /// Selectable options
    pub options: Vec<ItemOption>,
    /// Identifiers of all correct options
    pub correct_option_ids: Vec<String>,
    /// How many the candidate must select
    pub n: u32,
}

/// A passage with highlightable spans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightBody {
    /// The passage text
    pub passage: String,
    /// Indices of the spans that should be highlighted
    pub correct_span_indices: Vec<usize>,
    /// Pre-segmented spans, when authored explicitly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spans: Option<Vec<String>>,
}

/// Options to be arranged in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingBody {
    /// Orderable options
    pub options: Vec<ItemOption>,
    /// Option ids in the correct order
    pub correct_order: Vec<String>,
}

/// Rows matched against columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixBody {
    /// Rows
    pub rows: Vec<MatrixRow>,
    /// Columns
    pub columns: Vec<MatrixColumn>,
    /// The correct pairings
    pub correct_matches: Vec<MatrixMatch>,
}

/// A template with dropdown or drag-and-drop blanks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeBody {
    /// Template text containing one `{{id}}` placeholder per blank
    pub template: String,
    /// The blanks
    pub blanks: Vec<Blank>,
}

/// Causes and interventions around a central condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BowtieBody {
    /// The central condition, when named
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Candidate causes (left side)
    pub causes: Vec<BowtieNode>,
    /// Candidate interventions (right side)
    pub interventions: Vec<BowtieNode>,
    /// Identifiers of the correct causes
    pub correct_cause_ids: Vec<String>,
    /// Identifiers of the correct interventions
    pub correct_intervention_ids: Vec<String>,
}

/// Regions on an image, some of which are correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotBody {
    /// Selectable regions
    pub hotspots: Vec<HotspotRegion>,
    /// Identifiers of the correct regions
    pub correct_hotspot_ids: Vec<String>,
    /// Backing image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// The type-specific payload, discriminated by the `type` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ItemBody {
    /// Single best answer
    MultipleChoice(ChoiceBody),
    /// Select all that apply
    SelectAll(MultiBody),
    /// Select exactly N
    SelectN(SelectNBody),
    /// Span highlight
    Highlight(HighlightBody),
    /// Ordered sequence
    Ordering(OrderingBody),
    /// Matrix match
    Matrix(MatrixBody),
    /// Cloze with dropdowns
    Cloze(ClozeBody),
    /// Drag-and-drop cloze
    DragAndDrop(ClozeBody),
    /// Bowtie causal diagram
    Bowtie(BowtieBody),
    /// Trend analysis
    Trend(ChoiceBody),
    /// Priority action
    PriorityAction(ChoiceBody),
    /// Hotspot on image
    Hotspot(HotspotBody),
    /// Graphic choice
    GraphicOptions(ChoiceBody),
    /// Audio/video choice
    AudioVideo(ChoiceBody),
    /// Chart/exhibit choice
    ChartExhibit(ChoiceBody),
}

impl ItemBody {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> ItemKind {
        match self {
            ItemBody::MultipleChoice(_) => ItemKind::MultipleChoice,
            ItemBody::SelectAll(_) => ItemKind::SelectAll,
            ItemBody::SelectN(_) => ItemKind::SelectN,
            ItemBody::Highlight(_) => ItemKind::Highlight,
            ItemBody::Ordering(_) => ItemKind::Ordering,
            ItemBody::Matrix(_) => ItemKind::Matrix,
            ItemBody::Cloze(_) => ItemKind::Cloze,
            ItemBody::DragAndDrop(_) => ItemKind::DragAndDrop,
            ItemBody::Bowtie(_) => ItemKind::Bowtie,
            ItemBody::Trend(_) => ItemKind::Trend,
            ItemBody::PriorityAction(_) => ItemKind::PriorityAction,
            ItemBody::Hotspot(_) => ItemKind::Hotspot,
            ItemBody::GraphicOptions(_) => ItemKind::GraphicOptions,
            ItemBody::AudioVideo(_) => ItemKind::AudioVideo,
            ItemBody::ChartExhibit(_) => ItemKind::ChartExhibit,
        }
    }
}

/// One gradable assessment item in canonical form.
///
/// This is the shape the normalizer coerces records toward and the shape
/// authoring fixtures are built from. The audit engine itself consumes raw
/// JSON records, since its job is diagnosing records that do not fit here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Stable identifier, owned by the content store
    pub id: String,

    /// The prompt text
    pub stem: String,

    /// Type-specific payload (serialized inline with a `type` tag)
    #[serde(flatten)]
    pub body: ItemBody,

    /// Scoring rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<crate::ScoringRule>,

    /// Taxonomy metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pedagogy: Option<crate::Pedagogy>,

    /// Explanatory content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<crate::Rationale>,

    /// Embedded clinical narrative, when the item carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_narrative: Option<String>,

    /// Embedded timed vitals, when the item carries them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals_timeline: Option<Vec<VitalsEntry>>,
}

impl Item {
    /// The item's kind.
    pub fn kind(&self) -> ItemKind {
        self.body.kind()
    }

    /// Serialize to the wire shape consumed by the audit engine.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
