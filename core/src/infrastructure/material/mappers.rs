use chrono::{TimeZone, Utc};

use crate::domain::material::entities::Material;
use crate::entity::materials::Model as MaterialModel;

impl From<MaterialModel> for Material {
    fn from(model: MaterialModel) -> Self {
        Material {
            id: model.id,
            name: model.name,
            kind: model.kind,
            quantity: model.quantity,
            unit_price: model.unit_price,
            created_at: Utc.from_utc_datetime(&model.created_at),
            updated_at: Utc.from_utc_datetime(&model.updated_at),
        }
    }
}
