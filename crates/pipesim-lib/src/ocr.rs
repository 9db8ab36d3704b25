//! Legacy OCR versus a vision model, on a few built-in sample documents.

use serde::Serialize;

/// Confidence a vision scan reports for every document.
pub const VISION_CONFIDENCE: f64 = 0.98;

/// Built-in sample documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Invoice,
    IdCard,
    Note,
}

/// Printed content of a sample document. `title` is empty when the
/// document has none.
#[derive(Clone, Copy, Debug)]
pub struct Document {
    pub title: &'static str,
    pub content: &'static str,
}

impl DocumentKind {
    pub const ALL: [Self; 3] = [Self::Invoice, Self::IdCard, Self::Note];

    #[must_use]
    pub const fn document(self) -> Document {
        match self {
            Self::Invoice => Document {
                title: "INVOICE #99",
                content: "Item: Jetpack\nCost: $9000",
            },
            Self::IdCard => Document {
                title: "ID CARD",
                content: "Name: Alice\nRole: Pilot",
            },
            Self::Note => Document {
                title: "",
                content: "Don't forget\nto feed the\nAI model!",
            },
        }
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "invoice" => Ok(Self::Invoice),
            "idcard" | "id-card" => Ok(Self::IdCard),
            "note" => Ok(Self::Note),
            other => anyhow::bail!("unknown document: {other} (expected invoice, idcard or note)"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScanMetadata {
    pub has_title: bool,
}

/// Structured result of a vision scan.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VisionScan {
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    /// Content lines; the title is reported only through `metadata`.
    pub detected_text: Vec<String>,
    pub confidence: f64,
    pub metadata: ScanMetadata,
}

/// Legacy OCR: title and content as one uppercased blob with no structure.
/// A document without a title still gets the separating newline.
#[must_use]
pub fn scan_legacy(kind: DocumentKind) -> String {
    let doc = kind.document();
    format!("{}\n{}", doc.title, doc.content).to_uppercase()
}

#[must_use]
pub fn scan_vision(kind: DocumentKind) -> VisionScan {
    let doc = kind.document();
    VisionScan {
        kind,
        detected_text: doc.content.split('\n').map(str::to_string).collect(),
        confidence: VISION_CONFIDENCE,
        metadata: ScanMetadata {
            has_title: !doc.title.is_empty(),
        },
    }
}
