fn main() {
    multiversx_sc_meta_lib::cli_main::<cdp_controller::AbiProvider>();
}
