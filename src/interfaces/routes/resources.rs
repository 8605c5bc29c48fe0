use actix_web::{web, Scope};

use crate::handlers::{
    home::route_not_found,
    resources::{create, delete, get_by_id, list, update, ResourceState},
};

/// `/<collection>` with list/create on the root and get/update/delete by id.
/// Unrouted methods on either path fall through to "Route not found".
pub fn scope<R: ResourceState>() -> Scope {
    web::scope(&format!("/{}", R::COLLECTION))
        .service(
            web::resource("")
                .route(web::get().to(list::<R>))
                .route(web::post().to(create::<R>))
                .default_service(web::to(route_not_found)),
        )
        .service(
            web::resource("/{id}")
                .route(web::get().to(get_by_id::<R>))
                .route(web::put().to(update::<R>))
                .route(web::delete().to(delete::<R>))
                .default_service(web::to(route_not_found)),
        )
}
