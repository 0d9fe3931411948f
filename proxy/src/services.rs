use crate::client::Client;
use crate::utils::services_path;
use utility::types::meta::List;
use utility::types::service::Service;
use utility::Result;

impl<'s> Client<'s> {
    /// lists every service of `namespace`
    pub async fn list_services(&self, namespace: &str) -> Result<Vec<Service>> {
        let list: Option<List<Service>> = self.get_json(services_path(namespace).as_str()).await?;
        Ok(list.map(|l| l.items).unwrap_or_default())
    }
}
