fn main() {
    multiversx_sc_meta_lib::cli_main::<quorum_dao::AbiProvider>();
}
