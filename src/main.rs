fn main() -> anyhow::Result<()> {
    crm_dashboard_lib::run()
}
