use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Traefikize start up arguments
#[derive(Debug, Clone, Parser)]
#[command(name = "traefikize", version, about = "Convert NGINX Ingress annotations into Traefik CRDs", long_about = None)]
pub struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TRAEFIKIZE_LOG", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Read the NGINX Ingresses present in the cluster and emit their
    /// Traefik equivalents
    Convert(ConvertArgs),
    /// List the annotations the converter recognizes
    SupportedAnnotations,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ConvertArgs {
    /// Kubernetes namespace to read Ingresses from
    #[arg(short, long, default_value = "default")]
    pub namespace: String,

    /// Consider all namespaces
    #[arg(short, long)]
    pub all: bool,

    /// Directory the generated YAML documents are written to, one
    /// sub-directory per Ingress
    #[arg(long, default_value = "out")]
    pub out_dir: PathBuf,

    /// Heuristically map proxy-buffer-size onto Traefik buffering
    #[arg(long)]
    pub proxy_buffer_heuristic: bool,

    /// Never emit plugin-backed middlewares
    #[arg(long)]
    pub disable_plugins: bool,
}
