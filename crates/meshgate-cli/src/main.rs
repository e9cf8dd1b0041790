//! meshgate - render the desired gateway Services of a ServiceMesh

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use k8s_openapi::api::core::v1::Service;
use kube::CustomResourceExt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meshgate_common::crd::ServiceMesh;
use meshgate_common::kube_utils::OwnedObjectMeta;
use meshgate_gateways::{GatewayRole, GatewayServiceAssembler, IstioNaming, ServiceDescriptor};

/// meshgate - desired-state renderer for service mesh edge gateways
#[derive(Parser, Debug)]
#[command(name = "meshgate", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ServiceMesh CRD manifest
    Crd,

    /// Render gateway Services from a ServiceMesh manifest
    ///
    /// Without --role every enabled gateway is rendered. With --role only the
    /// named gateways are rendered, and an unknown role is an error.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Path to the ServiceMesh YAML manifest
    #[arg(short = 'f', long = "config", env = "MESHGATE_CONFIG")]
    config_file: PathBuf,

    /// Gateway role to render (ingress, egress); repeatable
    #[arg(long = "role")]
    roles: Vec<String>,

    /// Prefix for gateway Service names
    #[arg(long, env = "MESHGATE_NAME_PREFIX", default_value = "istio")]
    name_prefix: String,
}

fn main() -> anyhow::Result<()> {
    // stdout carries the rendered manifests
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Crd => {
            let crd = serde_yaml::to_string(&ServiceMesh::crd())
                .context("failed to serialize ServiceMesh CRD")?;
            println!("{crd}");
            Ok(())
        }
        Commands::Render(args) => run_render(args),
    }
}

fn run_render(args: RenderArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.config_file)
        .with_context(|| format!("failed to read config file {:?}", args.config_file))?;
    let mesh = ServiceMesh::from_yaml(&content)
        .with_context(|| format!("invalid ServiceMesh in {:?}", args.config_file))?;

    print!("{}", render(&mesh, &args.name_prefix, &args.roles)?);
    Ok(())
}

/// Render the selected gateway Services as a multi-document YAML stream
fn render(mesh: &ServiceMesh, name_prefix: &str, roles: &[String]) -> anyhow::Result<String> {
    let assembler =
        GatewayServiceAssembler::with(IstioNaming::new(name_prefix), OwnedObjectMeta);

    let descriptors: Vec<ServiceDescriptor> = if roles.is_empty() {
        assembler.desired_services(mesh)
    } else {
        selected_roles(roles)
            .iter()
            .map(|role| assembler.assemble_checked(mesh, role))
            .collect::<Result<_, _>>()?
    };

    info!(count = descriptors.len(), "Rendered gateway Services");

    let mut output = String::new();
    for descriptor in descriptors {
        let service = Service::from(descriptor);
        output.push_str("---\n");
        output.push_str(
            &serde_yaml::to_string(&service).context("failed to serialize Service")?,
        );
    }
    Ok(output)
}

/// Parse `--role` values in order, keeping the first of any duplicates
///
/// Aliases such as `ingress` and `IngressGateway` name the same role.
fn selected_roles(roles: &[String]) -> Vec<GatewayRole> {
    let mut selected: Vec<GatewayRole> = Vec::with_capacity(roles.len());
    for role in roles.iter().map(|raw| GatewayRole::from(raw.as_str())) {
        if !selected.contains(&role) {
            selected.push(role);
        }
    }
    selected
}
