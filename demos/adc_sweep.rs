//! Example: Sweep divider ratios across the clamp boundary.
//!
//! Shows where the 5 kV pulse peak starts pinning the ADC to full scale
//! as the divider gets tighter.
//!
//! Run with: cargo run --example adc_sweep

use fencewave::AdcModel;

fn main() {
    println!("ADC Divider Sweep");
    println!("=================\n");

    let peak_v = 5000.0;
    println!("pulse peak: {} V, vref: 3.3 V, 12-bit codes\n", peak_v);
    println!("{:>10}  {:>10}  {:>6}  clamped", "divider", "v_out (V)", "code");

    for divider in [500.0, 1000.0, 1515.0, 1516.0, 2000.0, 5000.0, 10_000.0] {
        let adc = AdcModel::default().with_divider_ratio(divider);
        let v_out = peak_v / divider;
        let code = adc.quantize(peak_v);
        println!(
            "{:>10}  {:>10.4}  {:>6}  {}",
            divider,
            v_out,
            code,
            if code == adc.max_code() { "yes" } else { "no" }
        );
    }
}
