//! GraphQL API definitions.

pub mod booking;
pub mod listing;
mod mutation;
pub mod notification;
pub mod page;
mod query;
pub mod quote;
pub mod review;
pub mod scalar;
pub mod share;
mod subscription;
pub mod user;

pub use self::{
    booking::Booking,
    listing::Listing,
    mutation::Mutation,
    notification::Notification,
    page::ItemPage,
    query::Query,
    quote::Quote,
    review::Review,
    subscription::Subscription,
    user::User,
};

/// GraphQL schema.
pub type Schema = juniper::RootNode<'static, Query, Mutation, Subscription>;

#[cfg(test)]
mod spec {
    use std::time;

    use axum::extract::FromRequestParts as _;
    use juniper::{graphql_value, DefaultScalarValue, ExecutionError, Value};
    use service::infra::Memory;

    use crate::{BrowseUrl, Context, Service};

    use super::{Mutation, Query, Schema, Subscription};

    type Response = (Value, Vec<ExecutionError<DefaultScalarValue>>);

    fn service() -> Service {
        let (svc, _) = service::Service::new(
            service::Config {
                jwt_encoding_key: jsonwebtoken::EncodingKey::from_secret(
                    b"secret",
                ),
                jwt_decoding_key: jsonwebtoken::DecodingKey::from_secret(
                    b"secret",
                ),
                expire_item_pages: service::task::expire_item_pages::Config {
                    interval: time::Duration::from_secs(10 * 60),
                    timeout: time::Duration::from_secs(60 * 60),
                },
            },
            Memory::new(),
        );
        svc
    }

    async fn execute(
        svc: &Service,
        token: Option<&str>,
        doc: &str,
    ) -> Response {
        let mut req = http::Request::builder()
            .extension(svc.clone())
            .extension(BrowseUrl("/browse".to_owned()));
        if let Some(token) = token {
            req = req.header(
                http::header::AUTHORIZATION,
                format!("Bearer {token}"),
            );
        }
        let (mut parts, ()) = req.body(()).unwrap().into_parts();
        let ctx = Context::from_request_parts(&mut parts, &()).await.unwrap();

        let schema = Schema::new(Query, Mutation, Subscription);
        juniper::execute(doc, None, &schema, &juniper::Variables::new(), &ctx)
            .await
            .unwrap()
    }

    fn at<'v>(value: &'v Value, path: &[&str]) -> &'v Value {
        path.iter().fold(value, |v, key| {
            v.as_object_value()
                .and_then(|o| o.get_field_value(*key))
                .unwrap_or_else(|| panic!("no `{key}` in {v:?}"))
        })
    }

    fn string(value: &Value, path: &[&str]) -> String {
        at(value, path).as_string_value().unwrap().to_owned()
    }

    fn extension<'e>(
        errs: &'e [ExecutionError<DefaultScalarValue>],
        name: &str,
    ) -> Option<&'e str> {
        errs.first()?
            .error()
            .extensions()
            .as_object_value()?
            .get_field_value(name)?
            .as_string_value()
    }

    async fn sign_up(svc: &Service, login: &str) -> String {
        let (res, errs) = execute(
            svc,
            None,
            &format!(
                r#"mutation {{
                    createUser(
                        name: "{login} name",
                        login: "{login}",
                        password: "qwerty123",
                    ) {{ token }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        string(&res, &["createUser", "token"])
    }

    async fn list_drill(svc: &Service, owner_token: &str) -> String {
        let (res, errs) = execute(
            svc,
            Some(owner_token),
            r#"mutation {
                createListing(
                    title: "Cordless drill",
                    description: "18V, two batteries.",
                    images: ["/img/drill.jpg"],
                    pricePerDay: "20USD",
                    depositFee: "50USD",
                    condition: GOOD,
                    category: "Tools",
                    location: "Portland, OR",
                    minRentalDays: 1,
                    maxRentalDays: 14,
                ) { id }
            }"#,
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        string(&res, &["createListing", "id"])
    }

    async fn open_page(svc: &Service, listing_id: &str) -> String {
        let (res, errs) = execute(
            svc,
            None,
            &format!(
                r#"mutation {{
                    openItemPage(listingId: "{listing_id}") {{ id }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        string(&res, &["openItemPage", "id"])
    }

    #[tokio::test]
    async fn books_picked_dates() {
        let svc = service();
        let owner = sign_up(&svc, "owner").await;
        let renter = sign_up(&svc, "renter").await;
        let listing_id = list_drill(&svc, &owner).await;
        let page_id = open_page(&svc, &listing_id).await;

        let (res, errs) = execute(
            &svc,
            None,
            &format!(
                r#"mutation {{
                    selectItemPageDates(
                        pageId: "{page_id}",
                        startDate: "2024-05-01T00:00:00Z",
                        endDate: "2024-05-04T00:00:00Z",
                    ) {{
                        quote {{ durationDays rentalTotal grandTotal }}
                    }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["selectItemPageDates", "quote"]),
            graphql_value!({
                "durationDays": 3,
                "rentalTotal": "60USD",
                "grandTotal": "110USD",
            }),
        );

        let booking = format!(
            r#"mutation {{
                requestItemPageBooking(pageId: "{page_id}") {{
                    booking {{ status totalPrice itemName }}
                    notification {{ title }}
                }}
            }}"#,
        );
        let (_, errs) = execute(&svc, Some(&owner), &booking).await;
        assert_eq!(extension(&errs, "code"), Some("OWN_LISTING"));

        let (res, errs) = execute(&svc, Some(&renter), &booking).await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["requestItemPageBooking"]),
            graphql_value!({
                "booking": {
                    "status": "PENDING",
                    "totalPrice": "60USD",
                    "itemName": "Cordless drill",
                },
                "notification": {"title": "Booking request sent"},
            }),
        );

        let (res, errs) =
            execute(&svc, Some(&renter), "{ myBookings { status } }").await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["myBookings"]),
            graphql_value!([{"status": "PENDING"}]),
        );
    }

    #[tokio::test]
    async fn asks_anonymous_to_login_before_booking() {
        let svc = service();
        let owner = sign_up(&svc, "owner").await;
        let listing_id = list_drill(&svc, &owner).await;
        let page_id = open_page(&svc, &listing_id).await;

        let (_, errs) = execute(
            &svc,
            None,
            &format!(
                r#"mutation {{
                    requestItemPageBooking(pageId: "{page_id}") {{
                        booking {{ id }}
                    }}
                }}"#,
            ),
        )
        .await;

        assert_eq!(extension(&errs, "code"), Some("AUTHENTICATION_REQUIRED"));
        assert_eq!(
            errs[0].error().message(),
            "Please login to book this item.",
        );
    }

    #[tokio::test]
    async fn offers_browsing_for_missing_listing() {
        let svc = service();

        let (_, errs) = execute(
            &svc,
            None,
            r#"mutation {
                openItemPage(
                    listingId: "00000000-0000-0000-0000-000000000001",
                ) { id }
            }"#,
        )
        .await;

        assert_eq!(extension(&errs, "code"), Some("LISTING_NOT_EXISTS"));
        assert_eq!(extension(&errs, "recovery"), Some("/browse"));
    }

    #[tokio::test]
    async fn submits_composed_review() {
        let svc = service();
        let owner = sign_up(&svc, "owner").await;
        let renter = sign_up(&svc, "renter").await;
        let listing_id = list_drill(&svc, &owner).await;
        let page_id = open_page(&svc, &listing_id).await;

        let open = format!(
            r#"mutation {{
                openItemPageReview(pageId: "{page_id}") {{
                    reviewForm {{ isOpen }}
                }}
            }}"#,
        );
        let (_, errs) = execute(&svc, None, &open).await;
        assert_eq!(extension(&errs, "code"), Some("AUTHENTICATION_REQUIRED"));

        let (res, errs) = execute(&svc, Some(&renter), &open).await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["openItemPageReview", "reviewForm", "isOpen"]),
            graphql_value!(true),
        );

        let submit = format!(
            r#"mutation {{
                submitItemPageReview(pageId: "{page_id}") {{
                    page {{
                        reviewForm {{ isOpen rating comment }}
                        reviews {{ rating comment userName }}
                    }}
                    notification {{ title }}
                }}
            }}"#,
        );
        let (_, errs) = execute(&svc, Some(&renter), &submit).await;
        assert_eq!(extension(&errs, "code"), Some("RATING_REQUIRED"));

        let (_, errs) = execute(
            &svc,
            Some(&renter),
            &format!(
                r#"mutation {{
                    rateItemPageReview(pageId: "{page_id}", rating: 5) {{
                        id
                    }}
                    commentItemPageReview(
                        pageId: "{page_id}",
                        comment: "Worked great!",
                    ) {{ id }}
                }}"#,
            ),
        )
        .await;
        assert!(errs.is_empty(), "{errs:?}");

        let (res, errs) = execute(&svc, Some(&renter), &submit).await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["submitItemPageReview", "page", "reviewForm"]),
            graphql_value!({"isOpen": false, "rating": null, "comment": ""}),
        );
        let reviews = at(&res, &["submitItemPageReview", "page", "reviews"])
            .as_list_value()
            .unwrap();
        assert_eq!(reviews.len(), 4);
        assert_eq!(
            reviews[0],
            graphql_value!({
                "rating": 5,
                "comment": "Worked great!",
                "userName": "renter name",
            }),
        );
        assert_eq!(
            string(&res, &["submitItemPageReview", "notification", "title"]),
            "Review submitted",
        );
    }

    #[tokio::test]
    async fn rejects_out_of_range_rating() {
        let svc = service();
        let schema = Schema::new(Query, Mutation, Subscription);
        let (mut parts, ()) = http::Request::builder()
            .extension(svc)
            .body(())
            .unwrap()
            .into_parts();
        let ctx = Context::from_request_parts(&mut parts, &()).await.unwrap();

        let res = juniper::execute(
            r#"mutation {
                rateItemPageReview(
                    pageId: "00000000-0000-0000-0000-000000000001",
                    rating: 6,
                ) { id }
            }"#,
            None,
            &schema,
            &juniper::Variables::new(),
            &ctx,
        )
        .await;

        assert!(res.is_err());
    }

    #[tokio::test]
    async fn shares_depending_on_native_capability() {
        let svc = service();
        let owner = sign_up(&svc, "owner").await;
        let listing_id = list_drill(&svc, &owner).await;
        let page_id = open_page(&svc, &listing_id).await;
        let share = |native: bool| {
            format!(
                r#"mutation {{
                    shareItemPage(
                        pageId: "{page_id}",
                        url: "https://rent.example/items/{listing_id}",
                        nativeShare: {native},
                    ) {{
                        share {{ title text }}
                        notification {{ title severity }}
                    }}
                }}"#,
            )
        };

        let (res, errs) = execute(&svc, None, &share(false)).await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["shareItemPage"]),
            graphql_value!({
                "share": null,
                "notification": {
                    "title": "Sharing not supported",
                    "severity": "DESTRUCTIVE",
                },
            }),
        );

        let (res, errs) = execute(&svc, None, &share(true)).await;
        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["shareItemPage"]),
            graphql_value!({
                "share": {
                    "title": "Cordless drill",
                    "text": "Check out this item: Cordless drill",
                },
                "notification": null,
            }),
        );
    }

    #[tokio::test]
    async fn double_wishlist_toggle_restores_state() {
        let svc = service();
        let owner = sign_up(&svc, "owner").await;
        let listing_id = list_drill(&svc, &owner).await;
        let page_id = open_page(&svc, &listing_id).await;
        let toggle = format!(
            r#"mutation {{
                toggleItemPageWishlist(pageId: "{page_id}") {{
                    page {{ isWishlisted }}
                    notification {{ title }}
                }}
            }}"#,
        );

        let (res, _) = execute(&svc, None, &toggle).await;
        assert_eq!(
            *at(&res, &["toggleItemPageWishlist"]),
            graphql_value!({
                "page": {"isWishlisted": true},
                "notification": {"title": "Added to wishlist"},
            }),
        );

        let (res, _) = execute(&svc, None, &toggle).await;
        assert_eq!(
            *at(&res, &["toggleItemPageWishlist"]),
            graphql_value!({
                "page": {"isWishlisted": false},
                "notification": {"title": "Removed from wishlist"},
            }),
        );
    }

    #[tokio::test]
    async fn shows_bookings_only_to_their_renter() {
        let svc = service();
        let owner = sign_up(&svc, "owner").await;
        let renter = sign_up(&svc, "renter").await;
        let listing_id = list_drill(&svc, &owner).await;

        let (res, errs) = execute(
            &svc,
            Some(&renter),
            &format!(
                r#"{{
                    listing(id: "{listing_id}") {{
                        owner {{ login listings {{ title }} bookings {{ id }} }}
                    }}
                    myUser {{ login bookings {{ id }} }}
                }}"#,
            ),
        )
        .await;

        assert!(errs.is_empty(), "{errs:?}");
        assert_eq!(
            *at(&res, &["listing", "owner"]),
            graphql_value!({
                "login": null,
                "listings": [{"title": "Cordless drill"}],
                "bookings": null,
            }),
        );
        assert_eq!(
            *at(&res, &["myUser"]),
            graphql_value!({"login": "renter", "bookings": []}),
        );
    }
}
