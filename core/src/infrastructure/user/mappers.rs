use chrono::{TimeZone, Utc};

use crate::domain::user::entities::User;
use crate::entity::users::Model as UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        let created_at = Utc.from_utc_datetime(&model.created_at);
        let updated_at = Utc.from_utc_datetime(&model.updated_at);
        User {
            id: model.id,
            name: model.name,
            email: model.email,
            role: model.role,
            phone: model.phone,
            is_active: model.is_active,
            created_at,
            updated_at,
        }
    }
}
