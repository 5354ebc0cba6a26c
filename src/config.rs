pub mod constant {
    pub const SEED: usize = 64;
    pub const DEPOT_COUNT: usize = 10;
    pub const CUSTOMER_COUNT: usize = 76;
    pub const PENALTY_VALUE: f64 = 1_000_000_000.0;
    pub const INITIAL_TEMPERATURE: f64 = 500.0;
    pub const FINAL_TEMPERATURE: f64 = 0.5;
    pub const COOLING_FACTOR: f64 = 0.98;
    pub const ITERATIONS_PER_TEMPERATURE: usize = 100;
}
