fn main() {
    // Generate domain classes for the integration tests into OUT_DIR/domain.
    // The tests read the generated text back, so nothing here is compiled.
    orm_domain_codegen::generate_from_cargo_metadata().expect("codegen failed");
}
