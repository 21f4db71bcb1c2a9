/*!

  Utils for gatework development.

*/

/// Compare a recorded probe trace against an `H`/`L` waveform string.
#[macro_export]
macro_rules! assert_trace_eq {
    ($trace:expr, $expected:expr $(,)?) => {
        match (&$trace, &$expected) {
            (trace_val, expected_val) => {
                let rendered: String = trace_val
                    .iter()
                    .map(|bit| if *bit { 'H' } else { 'L' })
                    .collect();
                assert_eq!(rendered.as_str(), *expected_val);
            }
        }
    };
}
