use miette::Result;

/// Main entry point for the deploy-descriptor CLI tool
fn main() -> Result<()> {
    miette::set_panic_hook();

    deploy_descriptor::run()
}
