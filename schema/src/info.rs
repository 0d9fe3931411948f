use std::fmt::{Display, Formatter};
use utility::types::function::Function;
use utility::types::ingress::Ingress;
use utility::types::service::Service;
use utility::ResourceKind;

///ConsolidatedInfo everything known about one deployed function, joined from
///its function resource, its service and its optional ingress
#[derive(Debug, Clone, PartialEq)]
pub struct ConsolidatedInfo {
    pub name: String,
    pub function: Function,
    pub service: Service,
    pub ingress: Option<Ingress>,
    /// load balancer address followed by the ingress path, only set when an ingress exists
    pub url: Option<String>,
    pub ambiguities: Vec<Ambiguity>,
}

///Ambiguity more than one record matched where one was expected; the first one was used
#[derive(Debug, Clone, PartialEq)]
pub struct Ambiguity {
    pub kind: ResourceKind,
    pub function: String,
    pub matches: usize,
    pub chosen: String,
}

impl Display for Ambiguity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "found {} {} records for function {}, using {}",
            self.matches, self.kind, self.function, self.chosen
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguity_display() {
        let ambiguity = Ambiguity {
            kind: ResourceKind::Ingress,
            function: "hello".into(),
            matches: 2,
            chosen: "hello-a".into(),
        };
        assert_eq!(
            ambiguity.to_string(),
            "found 2 ingress records for function hello, using hello-a"
        );
    }
}
