//! Solids der Registry.
//!
//! Solids werden weitgehend verbatim gehalten (Tag + Attribute + eine Ebene
//! Kind-Elemente), damit unbekannte GDML-Solids verlustfrei zurückgeschrieben
//! werden. Für die Standardformen gibt es typisierte Konstruktoren.

use super::units::LengthUnit;

/// Kind-Element eines Solids (z.B. `<first ref=.../>` einer Union, Facetten)
#[derive(Debug, Clone, PartialEq)]
pub struct SolidChild {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
}

/// Ein Solid der Registry
#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    /// Eindeutiger Name
    pub name: String,
    /// GDML-Tag (`box`, `tube`, `sphere`, `cone`, `torus`, `union`, …)
    pub tag: String,
    /// Alle Attribute außer `name`, in Original-Reihenfolge
    pub attributes: Vec<(String, String)>,
    pub children: Vec<SolidChild>,
}

/// Parameter der Standardformen zum Einfügen neuer Volumen.
///
/// Längen in der gewählten `LengthUnit`, Winkel in Grad.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Box {
        x: f64,
        y: f64,
        z: f64,
    },
    Tube {
        rmin: f64,
        rmax: f64,
        z: f64,
        start_phi: f64,
        delta_phi: f64,
    },
    Sphere {
        rmin: f64,
        rmax: f64,
        start_phi: f64,
        delta_phi: f64,
        start_theta: f64,
        delta_theta: f64,
    },
    Cone {
        rmin1: f64,
        rmax1: f64,
        rmin2: f64,
        rmax2: f64,
        z: f64,
        start_phi: f64,
        delta_phi: f64,
    },
    Torus {
        rmin: f64,
        rmax: f64,
        rtor: f64,
        start_phi: f64,
        delta_phi: f64,
    },
}

impl Shape {
    /// GDML-Tag der Form.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Tube { .. } => "tube",
            Self::Sphere { .. } => "sphere",
            Self::Cone { .. } => "cone",
            Self::Torus { .. } => "torus",
        }
    }

    fn parameters(&self) -> Vec<(&'static str, f64)> {
        match *self {
            Self::Box { x, y, z } => vec![("x", x), ("y", y), ("z", z)],
            Self::Tube {
                rmin,
                rmax,
                z,
                start_phi,
                delta_phi,
            } => vec![
                ("rmin", rmin),
                ("rmax", rmax),
                ("z", z),
                ("startphi", start_phi),
                ("deltaphi", delta_phi),
            ],
            Self::Sphere {
                rmin,
                rmax,
                start_phi,
                delta_phi,
                start_theta,
                delta_theta,
            } => vec![
                ("rmin", rmin),
                ("rmax", rmax),
                ("startphi", start_phi),
                ("deltaphi", delta_phi),
                ("starttheta", start_theta),
                ("deltatheta", delta_theta),
            ],
            Self::Cone {
                rmin1,
                rmax1,
                rmin2,
                rmax2,
                z,
                start_phi,
                delta_phi,
            } => vec![
                ("rmin1", rmin1),
                ("rmax1", rmax1),
                ("rmin2", rmin2),
                ("rmax2", rmax2),
                ("z", z),
                ("startphi", start_phi),
                ("deltaphi", delta_phi),
            ],
            Self::Torus {
                rmin,
                rmax,
                rtor,
                start_phi,
                delta_phi,
            } => vec![
                ("rmin", rmin),
                ("rmax", rmax),
                ("rtor", rtor),
                ("startphi", start_phi),
                ("deltaphi", delta_phi),
            ],
        }
    }

    fn has_angles(&self) -> bool {
        !matches!(self, Self::Box { .. })
    }
}

impl Solid {
    /// Erstellt ein Solid aus einer Standardform.
    pub fn from_shape(name: impl Into<String>, shape: &Shape, lunit: LengthUnit) -> Self {
        let mut attributes: Vec<(String, String)> = shape
            .parameters()
            .into_iter()
            .map(|(key, value)| (key.to_string(), format_number(value)))
            .collect();
        if shape.has_angles() {
            attributes.push(("aunit".to_string(), "deg".to_string()));
        }
        attributes.push(("lunit".to_string(), lunit.as_str().to_string()));

        Self {
            name: name.into(),
            tag: shape.tag().to_string(),
            attributes,
            children: Vec::new(),
        }
    }

    /// Liefert den Wert eines Attributs.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Menschenlesbare Kurzbeschreibung der Parameter für das Eigenschaften-Panel.
    ///
    /// Beispiel: `box: x=100 y=100 z=100 [mm]`
    pub fn describe(&self) -> String {
        let lunit = self.attribute("lunit").unwrap_or("mm");
        let aunit = self.attribute("aunit");

        let params: Vec<String> = self
            .attributes
            .iter()
            .filter(|(k, _)| k != "lunit" && k != "aunit")
            .map(|(k, v)| format!("{k}={v}"))
            .collect();

        let mut text = self.tag.clone();
        if !params.is_empty() {
            text.push_str(": ");
            text.push_str(&params.join(" "));
        }
        match aunit {
            Some(aunit) => text.push_str(&format!(" [{lunit}, {aunit}]")),
            None => text.push_str(&format!(" [{lunit}]")),
        }
        if !self.children.is_empty() {
            text.push_str(&format!(" (+{} Elemente)", self.children.len()));
        }
        text
    }
}

/// Formatiert eine Zahl ohne überflüssige Nachkommastellen (`100`, `0.5`).
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
