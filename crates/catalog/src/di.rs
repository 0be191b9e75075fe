use crate::{repository::ProductRepository, service::ProductService};
use prometheus_client::registry::Registry;
use std::fmt;

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_service: ProductService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_service", &self.product_service)
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub repository: ProductRepository,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Self {
        let DependenciesInjectDeps { repository } = deps;

        let product_service = ProductService::new(repository.query, repository.command, registry);

        Self { product_service }
    }
}
