/// Application service, generic over the repositories it drives.
#[derive(Clone)]
pub struct Service<U, P, M, HC> {
    pub(crate) user_repository: U,
    pub(crate) project_repository: P,
    pub(crate) material_repository: M,
    pub(crate) health_check_repository: HC,
    pub(crate) max_page_size: Option<u64>,
}

impl<U, P, M, HC> Service<U, P, M, HC> {
    pub fn new(
        user_repository: U,
        project_repository: P,
        material_repository: M,
        health_check_repository: HC,
        max_page_size: Option<u64>,
    ) -> Self {
        Self {
            user_repository,
            project_repository,
            material_repository,
            health_check_repository,
            max_page_size,
        }
    }
}
