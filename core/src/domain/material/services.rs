use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    material::{
        entities::Material,
        ports::{MaterialRepository, MaterialService},
        value_objects::{ListMaterialsInput, TYPE_PARAM},
    },
    project::ports::ProjectRepository,
    query::{
        Paginated, compile_query,
        normalizers::{EnumKind, create_case_insensitive_filter},
    },
    user::ports::UserRepository,
};

impl<U, P, M, HC> MaterialService for Service<U, P, M, HC>
where
    U: UserRepository,
    P: ProjectRepository,
    M: MaterialRepository,
    HC: HealthCheckRepository,
{
    async fn list_materials(
        &self,
        input: ListMaterialsInput,
    ) -> Result<Paginated<Material>, CoreError> {
        let schema = self.material_repository.schema();
        let kind = input
            .query
            .as_ref()
            .and_then(|query| query.get(TYPE_PARAM))
            .and_then(|kind| create_case_insensitive_filter("type", kind, EnumKind::Type));

        let compiled = compile_query(input.query.as_ref(), &schema, &[])?
            .with_max_limit(self.max_page_size)
            .and_filter(kind);

        self.material_repository.find_page(compiled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        health::ports::MockHealthCheckRepository,
        material::ports::MockMaterialRepository,
        project::ports::MockProjectRepository,
        query::{
            FieldDescriptor, FieldKind, ModelSchema,
            entities::compiled_query::{FieldRef, Predicate, PredicateValue, Search},
        },
        user::ports::MockUserRepository,
    };

    #[tokio::test]
    async fn type_param_is_lower_cased_and_absent_query_uses_defaults() {
        let mut materials = MockMaterialRepository::new();
        materials.expect_schema().returning(|| {
            ModelSchema::new(
                "id",
                vec![
                    FieldDescriptor::new("id", FieldKind::Uuid),
                    FieldDescriptor::new("type", FieldKind::Text),
                ],
            )
        });
        materials
            .expect_find_page()
            .withf(|query| query.search == Search::Blank && query.limit == 10)
            .times(1)
            .returning(|query| {
                Box::pin(async move {
                    Ok(Paginated {
                        items: Vec::new(),
                        page: query.page,
                        limit: query.limit,
                        count: 0,
                    })
                })
            });

        let service = Service::new(
            MockUserRepository::new(),
            MockProjectRepository::new(),
            materials,
            MockHealthCheckRepository::new(),
            None,
        );
        let page = service
            .list_materials(ListMaterialsInput::default())
            .await
            .unwrap();
        assert_eq!((page.page, page.limit), (1, 10));
    }

    #[tokio::test]
    async fn type_filter_is_normalized() {
        let mut materials = MockMaterialRepository::new();
        materials
            .expect_schema()
            .returning(|| ModelSchema::new("id", Vec::new()));
        materials
            .expect_find_page()
            .withf(|query| {
                query.filter
                    == vec![Predicate::eq(
                        FieldRef::column("type"),
                        PredicateValue::Text("standard".to_string()),
                    )]
            })
            .times(1)
            .returning(|_| {
                Box::pin(async {
                    Ok(Paginated {
                        items: Vec::new(),
                        page: 1,
                        limit: 10,
                        count: 0,
                    })
                })
            });

        let service = Service::new(
            MockUserRepository::new(),
            MockProjectRepository::new(),
            materials,
            MockHealthCheckRepository::new(),
            None,
        );
        let query = crate::domain::query::RawQuery::new().with("type", "STANDARD");
        service
            .list_materials(ListMaterialsInput { query: Some(query) })
            .await
            .unwrap();
    }
}
