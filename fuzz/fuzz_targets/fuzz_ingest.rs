#![no_main]

use libfuzzer_sys::fuzz_target;
use thermotangent::session::AnalysisSession;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either load or fail with an error, never panic
    let mut session = AnalysisSession::default();
    if session.load_csv(data).is_err() {
        return;
    }

    // A loaded dataset must survive the whole interactive path
    let Some((lo, hi)) = session.dataset().map(|d| d.temperature_range()) else {
        return;
    };
    let _ = session.click_derivative_at_temperature(lo);
    let _ = session.select_slot(1);
    let _ = session.click_derivative_at_temperature(hi);
    let _ = session.intersection();
    let _ = session.on_main_x_range_changed(lo, (lo + hi) / 2.0);
    let _ = session.reset_zoom();
});
