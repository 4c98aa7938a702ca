#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = facturas::pdf::from_pdf_bytes(data);
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = facturas::pdf::from_pdf_text(text);
    }
});
