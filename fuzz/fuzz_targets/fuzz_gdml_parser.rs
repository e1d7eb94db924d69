#![no_main]

use gdml_editor::{parse_gdml, reconcile, write_gdml};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Darf nie paniken, nur Fehler liefern
    if let Ok(registry) = parse_gdml(text) {
        let _ = reconcile(&registry);
        let _ = write_gdml(&registry);
    }
});
