use anyhow::Result;

use pipex::{ServiceRegistry, StreamingService};

pub fn cmd_services() -> Result<()> {
    let registry = ServiceRegistry::builtin();
    for service in registry.all() {
        let capabilities: Vec<String> = service
            .info()
            .media_capabilities
            .iter()
            .map(|c| format!("{c:?}").to_lowercase())
            .collect();
        println!(
            "{:>3}  {:<12} {}",
            service.id(),
            service.name(),
            capabilities.join(", ")
        );
    }
    Ok(())
}
