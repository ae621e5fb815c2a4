//! Balance simulator for the workstation.
//! Run with: cargo test -p objet-console simulate_diligent -- --nocapture
