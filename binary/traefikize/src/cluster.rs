use k8s_openapi::api::networking::v1::Ingress;
use kube::api::{Api, ListParams};
use kube::Client;

const PAGE_SIZE: u32 = 100;

/// List every Ingress in the namespace (or the whole cluster), following
/// the server's continue tokens.
pub async fn list_all_ingresses(client: Client, namespace: Option<&str>) -> Result<Vec<Ingress>, kube::Error> {
    let api: Api<Ingress> = match namespace {
        Some(namespace) => Api::namespaced(client, namespace),
        None => Api::all(client),
    };

    let mut ingresses = Vec::new();
    let mut params = ListParams::default().limit(PAGE_SIZE);

    loop {
        let list = api.list(&params).await?;
        ingresses.extend(list.items);

        match list.metadata.continue_ {
            Some(token) if !token.is_empty() => {
                params.continue_token = Some(token);
            }
            _ => break,
        }
    }

    Ok(ingresses)
}
