fn main() {
    multiversx_sc_meta_lib::cli_main::<guild_treasury::AbiProvider>();
}
