fn main() {
    // The esp-idf sysenv output is only meaningful when building the
    // firmware for the espidf target; host builds (used for tests) skip it.
    if std::env::var_os("CARGO_FEATURE_ESPIDF").is_some() {
        embuild::espidf::sysenv::output();
    }
}
