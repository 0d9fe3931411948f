use crate::client::Client;
use crate::utils::ingresses_path;
use utility::types::ingress::Ingress;
use utility::types::meta::List;
use utility::Result;

impl<'s> Client<'s> {
    /// lists every ingress of `namespace`
    pub async fn list_ingresses(&self, namespace: &str) -> Result<Vec<Ingress>> {
        let list: Option<List<Ingress>> =
            self.get_json(ingresses_path(namespace).as_str()).await?;
        Ok(list.map(|l| l.items).unwrap_or_default())
    }
}
