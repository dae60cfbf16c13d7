fn main() {
    multiversx_sc_meta_lib::cli_main::<power_router::AbiProvider>();
}
