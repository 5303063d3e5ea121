/// Equated monthly installment for `principal` at `annual_rate` percent over
/// `tenure_months`, rounded to two decimal places.
pub fn monthly_installment(principal: f64, annual_rate: f64, tenure_months: u32) -> f64 {
    // Zero-rate loans amortize linearly; the closed form divides by zero.
    if annual_rate == 0.0 {
        return round_to_cents(principal / f64::from(tenure_months));
    }

    let monthly_rate = annual_rate / 1200.0;
    let growth = (1.0 + monthly_rate).powi(tenure_months as i32);
    round_to_cents(principal * monthly_rate * growth / (growth - 1.0))
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
