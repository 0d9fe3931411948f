use crate::client::Client;
use crate::utils::{function_path, functions_path};
use utility::types::function::Function;
use utility::types::meta::List;
use utility::Result;

impl<'s> Client<'s> {
    /// lists every function resource of `namespace`
    pub async fn list_functions(&self, namespace: &str) -> Result<Vec<Function>> {
        let list: Option<List<Function>> =
            self.get_json(functions_path(namespace).as_str()).await?;
        Ok(list.map(|l| l.items).unwrap_or_default())
    }

    /// reads one function resource, `None` when the control plane does not know it
    pub async fn get_function(&self, namespace: &str, name: &str) -> Result<Option<Function>> {
        self.get_json(function_path(namespace, name).as_str()).await
    }
}
