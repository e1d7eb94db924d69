//! Eingebettete NIST-Tabellen (Geant4-Namen, Dichten in g/cm³, Massenanteile).

use crate::core::MaterialState::{self, Gas, Liquid, Solid};

/// (Symbol, Name, Z, A in g/mole)
pub(crate) const ELEMENTS: &[(&str, &str, u32, f64)] = &[
    ("H", "Hydrogen", 1, 1.008),
    ("He", "Helium", 2, 4.0026),
    ("Li", "Lithium", 3, 6.94),
    ("Be", "Beryllium", 4, 9.0122),
    ("B", "Boron", 5, 10.81),
    ("C", "Carbon", 6, 12.011),
    ("N", "Nitrogen", 7, 14.007),
    ("O", "Oxygen", 8, 15.999),
    ("F", "Fluorine", 9, 18.998),
    ("Ne", "Neon", 10, 20.180),
    ("Na", "Sodium", 11, 22.990),
    ("Mg", "Magnesium", 12, 24.305),
    ("Al", "Aluminium", 13, 26.982),
    ("Si", "Silicon", 14, 28.085),
    ("P", "Phosphorus", 15, 30.974),
    ("S", "Sulfur", 16, 32.06),
    ("Cl", "Chlorine", 17, 35.45),
    ("Ar", "Argon", 18, 39.948),
    ("K", "Potassium", 19, 39.098),
    ("Ca", "Calcium", 20, 40.078),
    ("Sc", "Scandium", 21, 44.956),
    ("Ti", "Titanium", 22, 47.867),
    ("V", "Vanadium", 23, 50.942),
    ("Cr", "Chromium", 24, 51.996),
    ("Mn", "Manganese", 25, 54.938),
    ("Fe", "Iron", 26, 55.845),
    ("Co", "Cobalt", 27, 58.933),
    ("Ni", "Nickel", 28, 58.693),
    ("Cu", "Copper", 29, 63.546),
    ("Zn", "Zinc", 30, 65.38),
    ("Ga", "Gallium", 31, 69.723),
    ("Ge", "Germanium", 32, 72.630),
    ("As", "Arsenic", 33, 74.922),
    ("Se", "Selenium", 34, 78.971),
    ("Br", "Bromine", 35, 79.904),
    ("Kr", "Krypton", 36, 83.798),
    ("Rb", "Rubidium", 37, 85.468),
    ("Sr", "Strontium", 38, 87.62),
    ("Y", "Yttrium", 39, 88.906),
    ("Zr", "Zirconium", 40, 91.224),
    ("Nb", "Niobium", 41, 92.906),
    ("Mo", "Molybdenum", 42, 95.95),
    ("Tc", "Technetium", 43, 98.0),
    ("Ru", "Ruthenium", 44, 101.07),
    ("Rh", "Rhodium", 45, 102.91),
    ("Pd", "Palladium", 46, 106.42),
    ("Ag", "Silver", 47, 107.87),
    ("Cd", "Cadmium", 48, 112.41),
    ("In", "Indium", 49, 114.82),
    ("Sn", "Tin", 50, 118.71),
    ("Sb", "Antimony", 51, 121.76),
    ("Te", "Tellurium", 52, 127.60),
    ("I", "Iodine", 53, 126.90),
    ("Xe", "Xenon", 54, 131.29),
    ("Cs", "Caesium", 55, 132.91),
    ("Ba", "Barium", 56, 137.33),
    ("La", "Lanthanum", 57, 138.91),
    ("Ce", "Cerium", 58, 140.12),
    ("Pr", "Praseodymium", 59, 140.91),
    ("Nd", "Neodymium", 60, 144.24),
    ("Pm", "Promethium", 61, 145.0),
    ("Sm", "Samarium", 62, 150.36),
    ("Eu", "Europium", 63, 151.96),
    ("Gd", "Gadolinium", 64, 157.25),
    ("Tb", "Terbium", 65, 158.93),
    ("Dy", "Dysprosium", 66, 162.50),
    ("Ho", "Holmium", 67, 164.93),
    ("Er", "Erbium", 68, 167.26),
    ("Tm", "Thulium", 69, 168.93),
    ("Yb", "Ytterbium", 70, 173.05),
    ("Lu", "Lutetium", 71, 174.97),
    ("Hf", "Hafnium", 72, 178.49),
    ("Ta", "Tantalum", 73, 180.95),
    ("W", "Tungsten", 74, 183.84),
    ("Re", "Rhenium", 75, 186.21),
    ("Os", "Osmium", 76, 190.23),
    ("Ir", "Iridium", 77, 192.22),
    ("Pt", "Platinum", 78, 195.08),
    ("Au", "Gold", 79, 196.97),
    ("Hg", "Mercury", 80, 200.59),
    ("Tl", "Thallium", 81, 204.38),
    ("Pb", "Lead", 82, 207.2),
    ("Bi", "Bismuth", 83, 208.98),
    ("Po", "Polonium", 84, 209.0),
    ("At", "Astatine", 85, 210.0),
    ("Rn", "Radon", 86, 222.0),
    ("Fr", "Francium", 87, 223.0),
    ("Ra", "Radium", 88, 226.0),
    ("Ac", "Actinium", 89, 227.0),
    ("Th", "Thorium", 90, 232.04),
    ("Pa", "Protactinium", 91, 231.04),
    ("U", "Uranium", 92, 238.03),
    ("Np", "Neptunium", 93, 237.0),
    ("Pu", "Plutonium", 94, 244.0),
    ("Am", "Americium", 95, 243.0),
    ("Cm", "Curium", 96, 247.0),
    ("Bk", "Berkelium", 97, 247.0),
    ("Cf", "Californium", 98, 251.0),
];

/// (Name, Dichte in g/cm³, Zustand, Massenanteile pro Elementsymbol)
pub(crate) type MaterialRow = (&'static str, f64, MaterialState, &'static [(&'static str, f64)]);

pub(crate) const MATERIALS: &[MaterialRow] = &[
    // Elementare Materialien
    ("G4_H", 8.3748e-05, Gas, &[("H", 1.0)]),
    ("G4_He", 1.66322e-04, Gas, &[("He", 1.0)]),
    ("G4_Be", 1.848, Solid, &[("Be", 1.0)]),
    ("G4_C", 2.0, Solid, &[("C", 1.0)]),
    ("G4_N", 1.1652e-03, Gas, &[("N", 1.0)]),
    ("G4_O", 1.33151e-03, Gas, &[("O", 1.0)]),
    ("G4_Mg", 1.74, Solid, &[("Mg", 1.0)]),
    ("G4_Al", 2.699, Solid, &[("Al", 1.0)]),
    ("G4_Si", 2.33, Solid, &[("Si", 1.0)]),
    ("G4_Ar", 1.66201e-03, Gas, &[("Ar", 1.0)]),
    ("G4_Ca", 1.55, Solid, &[("Ca", 1.0)]),
    ("G4_Ti", 4.54, Solid, &[("Ti", 1.0)]),
    ("G4_Cr", 7.18, Solid, &[("Cr", 1.0)]),
    ("G4_Fe", 7.874, Solid, &[("Fe", 1.0)]),
    ("G4_Co", 8.9, Solid, &[("Co", 1.0)]),
    ("G4_Ni", 8.902, Solid, &[("Ni", 1.0)]),
    ("G4_Cu", 8.96, Solid, &[("Cu", 1.0)]),
    ("G4_Zn", 7.133, Solid, &[("Zn", 1.0)]),
    ("G4_Ge", 5.323, Solid, &[("Ge", 1.0)]),
    ("G4_Mo", 10.22, Solid, &[("Mo", 1.0)]),
    ("G4_Ag", 10.5, Solid, &[("Ag", 1.0)]),
    ("G4_Sn", 7.31, Solid, &[("Sn", 1.0)]),
    ("G4_Ta", 16.654, Solid, &[("Ta", 1.0)]),
    ("G4_W", 19.3, Solid, &[("W", 1.0)]),
    ("G4_Pt", 21.45, Solid, &[("Pt", 1.0)]),
    ("G4_Au", 19.32, Solid, &[("Au", 1.0)]),
    ("G4_Pb", 11.35, Solid, &[("Pb", 1.0)]),
    ("G4_U", 18.95, Solid, &[("U", 1.0)]),
    ("G4_lH2", 0.0708, Liquid, &[("H", 1.0)]),
    ("G4_lAr", 1.396, Liquid, &[("Ar", 1.0)]),
    // Verbindungen und Gemische
    (
        "G4_AIR",
        1.20479e-03,
        Gas,
        &[("C", 0.000124), ("N", 0.755268), ("O", 0.231781), ("Ar", 0.012827)],
    ),
    ("G4_Galactic", 1e-25, Gas, &[("H", 1.0)]),
    ("G4_WATER", 1.0, Liquid, &[("H", 0.111894), ("O", 0.888106)]),
    (
        "G4_CONCRETE",
        2.3,
        Solid,
        &[
            ("H", 0.01),
            ("C", 0.001),
            ("O", 0.529107),
            ("Na", 0.016),
            ("Mg", 0.002),
            ("Al", 0.033872),
            ("Si", 0.337021),
            ("K", 0.013),
            ("Ca", 0.044),
            ("Fe", 0.014),
        ],
    ),
    (
        "G4_PLASTIC_SC_VINYLTOLUENE",
        1.032,
        Solid,
        &[("H", 0.085), ("C", 0.915)],
    ),
    ("G4_POLYETHYLENE", 0.94, Solid, &[("H", 0.143711), ("C", 0.856289)]),
    ("G4_POLYSTYRENE", 1.06, Solid, &[("H", 0.077421), ("C", 0.922579)]),
    (
        "G4_PLEXIGLASS",
        1.19,
        Solid,
        &[("H", 0.080538), ("C", 0.599848), ("O", 0.319614)],
    ),
    (
        "G4_KAPTON",
        1.42,
        Solid,
        &[("H", 0.026362), ("C", 0.691133), ("N", 0.07327), ("O", 0.209235)],
    ),
    (
        "G4_MYLAR",
        1.4,
        Solid,
        &[("H", 0.041959), ("C", 0.625017), ("O", 0.333024)],
    ),
    ("G4_TEFLON", 2.2, Solid, &[("C", 0.240183), ("F", 0.759817)]),
    (
        "G4_NYLON-6-6",
        1.14,
        Solid,
        &[("H", 0.097976), ("C", 0.636856), ("N", 0.123779), ("O", 0.141389)],
    ),
    (
        "G4_STAINLESS-STEEL",
        8.0,
        Solid,
        &[("Fe", 0.7462), ("Cr", 0.169), ("Ni", 0.0848)],
    ),
    (
        "G4_BRASS",
        8.52,
        Solid,
        &[("Cu", 0.62), ("Zn", 0.35), ("Pb", 0.03)],
    ),
    (
        "G4_BGO",
        7.13,
        Solid,
        &[("O", 0.154126), ("Ge", 0.17492), ("Bi", 0.671054)],
    ),
    (
        "G4_PbWO4",
        8.28,
        Solid,
        &[("O", 0.140637), ("W", 0.404011), ("Pb", 0.455352)],
    ),
    ("G4_CESIUM_IODIDE", 4.51, Solid, &[("I", 0.488451), ("Cs", 0.511549)]),
    ("G4_SODIUM_IODIDE", 3.667, Solid, &[("Na", 0.153373), ("I", 0.846627)]),
    ("G4_LITHIUM_FLUORIDE", 2.635, Solid, &[("Li", 0.267585), ("F", 0.732415)]),
    ("G4_SILICON_DIOXIDE", 2.32, Solid, &[("O", 0.532565), ("Si", 0.467435)]),
    (
        "G4_GLASS_PLATE",
        2.4,
        Solid,
        &[("O", 0.4598), ("Na", 0.0964), ("Si", 0.3365), ("Ca", 0.1073)],
    ),
];
