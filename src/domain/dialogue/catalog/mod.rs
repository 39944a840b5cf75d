//! Built-in flow catalog.
//!
//! One registration flow per sector. Each flow appends to the collection
//! the admin dashboard reads requests from.

mod fishing;
mod food_program;
mod rural;

use std::collections::HashSet;

use super::flow::{FlowDefinition, FlowId};
use crate::domain::foundation::{DomainError, ErrorCode, Sector};

pub use fishing::fishing_registration;
pub use food_program::food_program_registration;
pub use rural::rural_registration;

pub const RURAL_REGISTRATION: &str = "rural-registration";
pub const FISHING_REGISTRATION: &str = "fishing-registration";
pub const FOOD_PROGRAM_REGISTRATION: &str = "food-program-registration";

pub const AGRICULTURE_COLLECTION: &str = "solicitacoes_agricultura";
pub const FISHING_COLLECTION: &str = "solicitacoes_pesca";
pub const FOOD_PROGRAM_COLLECTION: &str = "solicitacoes_paa";

/// Set of flows the engine can run, with one default.
#[derive(Debug, Clone)]
pub struct FlowCatalog {
    flows: Vec<FlowDefinition>,
    default_flow: FlowId,
}

impl FlowCatalog {
    /// Creates a catalog; ids must be unique and the default must exist.
    pub fn new(flows: Vec<FlowDefinition>, default_flow: FlowId) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for flow in &flows {
            if !seen.insert(flow.id().clone()) {
                return Err(DomainError::new(
                    ErrorCode::InvalidFlowDefinition,
                    format!("flow '{}' is defined twice", flow.id()),
                ));
            }
        }
        if !seen.contains(&default_flow) {
            return Err(DomainError::new(
                ErrorCode::FlowNotFound,
                format!("default flow '{}' is not in the catalog", default_flow),
            ));
        }
        Ok(Self {
            flows,
            default_flow,
        })
    }

    /// The three sector flows, defaulting to rural registration.
    pub fn standard() -> Result<Self, DomainError> {
        Self::new(
            vec![
                rural_registration()?,
                fishing_registration()?,
                food_program_registration()?,
            ],
            FlowId::new(RURAL_REGISTRATION),
        )
    }

    pub fn get(&self, id: &FlowId) -> Option<&FlowDefinition> {
        self.flows.iter().find(|f| f.id() == id)
    }

    /// First flow registered for `sector`.
    pub fn for_sector(&self, sector: Sector) -> Option<&FlowDefinition> {
        self.flows.iter().find(|f| f.sector() == sector)
    }

    pub fn default_flow(&self) -> &FlowId {
        &self.default_flow
    }

    pub fn flows(&self) -> &[FlowDefinition] {
        &self.flows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::flow::AnswerShape;

    #[test]
    fn standard_catalog_builds() {
        let catalog = FlowCatalog::standard().unwrap();
        assert_eq!(catalog.flows().len(), 3);
        assert_eq!(catalog.default_flow().as_str(), RURAL_REGISTRATION);
    }

    #[test]
    fn rural_flow_has_32_entries() {
        let flow = rural_registration().unwrap();
        assert_eq!(flow.entry_count(), 32);
        assert_eq!(flow.expected_answers(), 31);
    }

    #[test]
    fn rural_flow_opens_with_property_name() {
        let flow = rural_registration().unwrap();
        assert_eq!(flow.first_prompt(), Some("Qual o nome da propriedade?"));
        assert_eq!(flow.question(0).unwrap().shape, AnswerShape::FreeText);
        assert_eq!(flow.mapping()[0].group, "propriedade");
        assert_eq!(flow.mapping()[0].field, "nome");
    }

    #[test]
    fn each_sector_has_its_own_collection() {
        let catalog = FlowCatalog::standard().unwrap();
        let keys: Vec<_> = Sector::all()
            .iter()
            .map(|s| catalog.for_sector(*s).unwrap().collection_key())
            .collect();
        assert_eq!(
            keys,
            vec![AGRICULTURE_COLLECTION, FISHING_COLLECTION, FOOD_PROGRAM_COLLECTION]
        );
    }

    #[test]
    fn every_flow_contains_a_yes_no_question() {
        let catalog = FlowCatalog::standard().unwrap();
        for flow in catalog.flows() {
            assert!(
                flow.questions().iter().any(|q| q.shape == AnswerShape::YesNo),
                "{} has no yes/no question",
                flow.id()
            );
        }
    }

    #[test]
    fn rejects_duplicate_flow_ids() {
        let result = FlowCatalog::new(
            vec![rural_registration().unwrap(), rural_registration().unwrap()],
            FlowId::new(RURAL_REGISTRATION),
        );
        assert!(result.is_err());
    }

    #[test]
    fn rejects_missing_default() {
        let err = FlowCatalog::new(
            vec![fishing_registration().unwrap()],
            FlowId::new(RURAL_REGISTRATION),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::FlowNotFound);
    }

    #[test]
    fn lookup_by_id_finds_flow() {
        let catalog = FlowCatalog::standard().unwrap();
        let flow = catalog.get(&FlowId::new(FISHING_REGISTRATION)).unwrap();
        assert_eq!(flow.sector(), Sector::Pesca);
        assert!(catalog.get(&FlowId::new("unknown")).is_none());
    }
}
