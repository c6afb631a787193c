use anyhow::{Result, bail};
use cargo_launch_core::{
    DefaultVariableResolver, JsonFileStore, ProcessLauncher, ProjectHandle,
};
use std::path::Path;

use crate::utils::WorkspaceContext;

pub fn list_command(
    project: Option<&str>,
    workspace: Option<&Path>,
    store: Option<&Path>,
) -> Result<()> {
    let context = WorkspaceContext::load(workspace)?;
    let Some(store_path) = context.store_path(store) else {
        bail!("No launch configuration store configured, pass --store or set \"store\" in .cargo-launch.json");
    };

    let variables = DefaultVariableResolver::new(&context.root)
        .with_variables(context.config.variables.clone());
    let launcher = ProcessLauncher::new(
        context.config.program.clone(),
        &context.root,
        Box::new(variables),
    );

    let descriptors: Vec<_> = JsonFileStore::new(&store_path)
        .load_all()?
        .into_iter()
        .filter(|d| project.is_none_or(|name| d.project_name == name))
        .collect();

    if descriptors.is_empty() {
        println!("No launch configurations in {}", store_path.display());
        return Ok(());
    }

    for descriptor in descriptors {
        let usable = context.registry.project(&descriptor.project_name).is_usable();
        println!(
            "🚀 {} ({}){}",
            descriptor.name,
            descriptor.kind,
            if usable { "" } else { " ⚠️  project missing" }
        );
        println!("   {}", launcher.command_for(&descriptor).to_shell_command());
    }

    Ok(())
}
