fn main() {
    multiversx_sc_meta_lib::cli_main::<master_supplier::AbiProvider>();
}
