use clap::Parser;
use traefikize_convert::{ConvertContext, GlobalReport, Options};
use traefikize_model::{Annotation, BoxError};

mod args;
mod cluster;
mod render;

fn main() -> Result<(), BoxError> {
    let args = args::Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
        .init();

    match args.command {
        args::Command::SupportedAnnotations => {
            for annotation in Annotation::ALL {
                println!("{}", annotation);
            }
            Ok(())
        }
        args::Command::Convert(convert_args) => {
            let rt = tokio::runtime::Builder::new_multi_thread().enable_all().thread_name(env!("CARGO_PKG_NAME")).build().expect("fail to build runtime");
            rt.block_on(convert(convert_args))
        }
    }
}

async fn convert(args: args::ConvertArgs) -> Result<(), BoxError> {
    let client = kube::Client::try_default().await?;
    let namespace = if args.all { None } else { Some(args.namespace.as_str()) };
    let ingresses = cluster::list_all_ingresses(client, namespace).await?;
    tracing::info!(count = ingresses.len(), "listed ingresses");

    let opts = Options {
        proxy_buffer_heuristic: args.proxy_buffer_heuristic,
        disable_plugins: args.disable_plugins,
    };

    let mut global = GlobalReport::default();

    for ingress in &ingresses {
        let mut ctx = ConvertContext::new(ingress);
        let name = ctx.ingress_name.clone();

        traefikize_convert::run(&mut ctx, ingress, &opts);

        // a write failure is fatal to the run, unlike conversion failures
        render::write_yaml(&ctx.result, &args.out_dir.join(&name))?;

        render::print_ingress_report(&ctx.result.report);
        global.ingresses.push(ctx.result.report);
    }

    render::print_global_summary(&global);

    tracing::info!("nginx ingress to traefik conversion completed");

    Ok(())
}
