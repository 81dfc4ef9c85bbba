//! Font resolution: an ordered list of candidate files per weight, then the system font
//! database, then the built-in bitmap font. Resolution never fails.

use std::{path::PathBuf, sync::Arc};

use usvg::fontdb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl FontWeight {
    pub fn svg_value(self) -> &'static str {
        match self {
            Self::Regular => "normal",
            Self::Bold => "bold",
        }
    }
}

/// A font the compositor can draw with.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedFont {
    /// A face from the resolver's font database, referenced by family name.
    Face {
        family: String,
        weight: FontWeight,
        size_px: f32,
    },
    /// The built-in 5×7 bitmap font.
    Builtin { size_px: f32 },
}

impl ResolvedFont {
    pub fn size_px(&self) -> f32 {
        match self {
            Self::Face { size_px, .. } | Self::Builtin { size_px } => *size_px,
        }
    }
}

/// Capability: "give me a font of size S and weight W".
pub trait FontResolver {
    fn resolve(&self, size_px: f32, weight: FontWeight) -> ResolvedFont;

    /// Database that backs every [`ResolvedFont::Face`] this resolver hands out.
    fn fontdb(&self) -> Arc<fontdb::Database>;
}

/// Ordered font file candidates; the first file that loads wins for each weight.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FontCandidates {
    pub regular: Vec<PathBuf>,
    pub bold: Vec<PathBuf>,
    /// Scan the platform font directories when no candidate loads.
    pub system_fallback: bool,
}

impl Default for FontCandidates {
    fn default() -> Self {
        let regular = [
            r"C:\Windows\Fonts\arial.ttf",
            r"C:\Windows\Fonts\calibri.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "/Library/Fonts/Arial.ttf",
        ];
        let bold = [
            r"C:\Windows\Fonts\arialbd.ttf",
            r"C:\Windows\Fonts\calibrib.ttf",
            "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
            "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
            "/Library/Fonts/Arial Bold.ttf",
        ];
        Self {
            regular: regular.iter().map(PathBuf::from).collect(),
            bold: bold.iter().map(PathBuf::from).collect(),
            system_fallback: true,
        }
    }
}

/// Families preferred when falling back to the system font database.
const PREFERRED_SYSTEM_FAMILIES: [&str; 5] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Arial",
    "Noto Sans",
    "Helvetica",
];

/// Font database plus the family chosen for each weight.
#[derive(Clone, Debug)]
pub struct FontBook {
    db: Arc<fontdb::Database>,
    regular: Option<String>,
    bold: Option<String>,
}

impl FontBook {
    pub fn load(candidates: &FontCandidates) -> Self {
        let mut db = fontdb::Database::new();
        let regular = load_first(&mut db, &candidates.regular);
        let bold = load_first(&mut db, &candidates.bold);

        let (regular, bold) = if regular.is_none() && bold.is_none() && candidates.system_fallback
        {
            db.load_system_fonts();
            let family = pick_system_family(&db);
            (family.clone(), family)
        } else {
            (regular, bold)
        };

        match (&regular, &bold) {
            (None, None) => tracing::warn!("no usable font found, using built-in bitmap font"),
            _ => tracing::debug!(?regular, ?bold, "fonts resolved"),
        }

        Self {
            db: Arc::new(db),
            regular,
            bold,
        }
    }

    /// Resolver that always hands out the built-in bitmap font.
    pub fn builtin_only() -> Self {
        Self {
            db: Arc::new(fontdb::Database::new()),
            regular: None,
            bold: None,
        }
    }

    pub fn family(&self, weight: FontWeight) -> Option<&str> {
        let (preferred, other) = match weight {
            FontWeight::Regular => (&self.regular, &self.bold),
            FontWeight::Bold => (&self.bold, &self.regular),
        };
        preferred.as_deref().or(other.as_deref())
    }
}

impl FontResolver for FontBook {
    fn resolve(&self, size_px: f32, weight: FontWeight) -> ResolvedFont {
        match self.family(weight) {
            Some(family) => ResolvedFont::Face {
                family: family.to_string(),
                weight,
                size_px,
            },
            None => ResolvedFont::Builtin { size_px },
        }
    }

    fn fontdb(&self) -> Arc<fontdb::Database> {
        Arc::clone(&self.db)
    }
}

fn load_first(db: &mut fontdb::Database, paths: &[PathBuf]) -> Option<String> {
    for path in paths {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(bytes)));
        let family = ids
            .first()
            .and_then(|id| db.face(*id))
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone());
        if family.is_some() {
            tracing::debug!(path = %path.display(), ?family, "loaded font candidate");
            return family;
        }
    }
    None
}

fn pick_system_family(db: &fontdb::Database) -> Option<String> {
    let mut first = None;
    for face in db.faces() {
        let Some((name, _)) = face.families.first() else {
            continue;
        };
        if PREFERRED_SYSTEM_FAMILIES.contains(&name.as_str()) {
            return Some(name.clone());
        }
        if first.is_none() {
            first = Some(name.clone());
        }
    }
    first
}

#[cfg(test)]
#[path = "../../tests/unit/render/font.rs"]
mod tests;
