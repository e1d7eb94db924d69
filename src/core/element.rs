/// Chemisches Element, wie es in `<materials>` einer GDML-Datei steht.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Registry-Name (z.B. `G4_H` oder `Nitrogen`)
    pub name: String,
    /// Elementsymbol (GDML-Attribut `formula`)
    pub symbol: String,
    /// Ordnungszahl
    pub z: f64,
    /// Molare Masse in g/mole
    pub a: f64,
}

impl Element {
    /// Erstellt ein neues Element
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, z: f64, a: f64) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            z,
            a,
        }
    }

    /// Platzhalter für ein unbekanntes Symbol (Z = 1, A = 1 g/mole).
    ///
    /// Trägt keine physikalisch sinnvollen Daten.
    pub fn placeholder(symbol: &str) -> Self {
        Self::new(symbol, symbol, 1.0, 1.0)
    }
}
