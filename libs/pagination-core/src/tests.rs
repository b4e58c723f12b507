#[cfg(test)]
#[allow(clippy::module_inception)]
mod tests {
    use crate::{
        valid_orders, Cursor, CursorPage, CursorRow, CursorValue, Error, ErrorCategory,
        FieldLocation, OrderField, OrderSpec, SortDir,
    };
    use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
    use base64::Engine as _;
    use chrono::{TimeZone, Utc};

    fn b64(json: &str) -> String {
        STANDARD.encode(json.as_bytes())
    }

    #[test]
    fn test_parse_order_accepts_every_field_and_direction() {
        for field in OrderField::ALL {
            for dir in SortDir::ALL {
                let raw = format!("{} {}", field.as_str(), dir.as_str());
                let spec = OrderSpec::parse(&raw).expect("valid order");
                assert_eq!(spec.field, field);
                assert_eq!(spec.dir, dir);
                assert_eq!(spec.to_string(), raw);
            }
        }
        assert_eq!(valid_orders().len(), 14);
    }

    #[test]
    fn test_parse_order_rejects_malformed_strings() {
        for raw in [
            "",
            "experience",
            "experience  DESC",
            "experience DESC ",
            " experience DESC",
            "experience desc",
            "experience DOWN",
            "rating DESC",
            "experience DESC extra",
            "experience\tDESC",
        ] {
            assert!(
                matches!(OrderSpec::parse(raw), Err(Error::InvalidOrder(_))),
                "'{raw}' should be rejected"
            );
        }
    }

    #[test]
    fn test_field_locations() {
        assert_eq!(
            OrderField::Experience.location(),
            FieldLocation::Base("experience")
        );
        assert_eq!(
            OrderField::MoveDate.location(),
            FieldLocation::Base("move_date")
        );
        assert_eq!(
            OrderField::LikeCount.location(),
            FieldLocation::Stats("like_count")
        );
        assert_eq!(
            OrderField::AverageRating.location(),
            FieldLocation::Stats("average_rating")
        );
    }

    #[test]
    fn test_order_spec_serde_as_string() {
        let spec = OrderSpec::new(OrderField::ReviewCount, SortDir::Desc);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, "\"review_count DESC\"");
        let back: OrderSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spec);
        assert!(serde_json::from_str::<OrderSpec>("\"review_count\"").is_err());
    }

    #[test]
    fn test_cursor_round_trip_per_kind() {
        let cursors = [
            Cursor::new(
                "m-1",
                CursorValue::Integer(3),
                OrderSpec::new(OrderField::ReviewCount, SortDir::Desc),
            ),
            Cursor::new(
                "m-2",
                CursorValue::Float(4.25),
                OrderSpec::new(OrderField::AverageRating, SortDir::Asc),
            ),
            Cursor::new(
                "m-3",
                CursorValue::Timestamp(Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()),
                OrderSpec::new(OrderField::MoveDate, SortDir::Asc),
            ),
        ];

        for cursor in cursors {
            let decoded = Cursor::decode(&cursor.encode().unwrap()).expect("decode");
            assert_eq!(decoded, cursor);
        }
    }

    #[test]
    fn test_non_finite_float_cannot_become_a_cursor() {
        let order = OrderSpec::new(OrderField::AverageRating, SortDir::Desc);
        for f in [f64::NAN, f64::INFINITY] {
            let err = Cursor::new("m-1", CursorValue::Float(f), order)
                .encode()
                .unwrap_err();
            assert!(matches!(err, Error::CursorEncode(_)), "{err:?}");
        }
        assert!(Cursor::new("m-1", CursorValue::Float(4.5), order).encode().is_ok());
    }

    #[test]
    fn test_cursor_wire_format() {
        let cursor = Cursor::new(
            "x",
            CursorValue::Integer(3),
            OrderSpec::new(OrderField::ReviewCount, SortDir::Desc),
        );
        let raw = STANDARD.decode(cursor.encode().unwrap()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "values": { "id": "x", "review_count": 3 },
                "order": "review_count DESC"
            })
        );
    }

    #[test]
    fn test_cursor_decode_hand_built_token() {
        let token = b64(r#"{"values":{"id":"x","review_count":3},"order":"review_count DESC"}"#);
        let cursor = Cursor::decode(&token).unwrap();
        assert_eq!(cursor.id, "x");
        assert_eq!(cursor.value, CursorValue::Integer(3));
        assert_eq!(cursor.order.field, OrderField::ReviewCount);
        assert_eq!(cursor.order.dir, SortDir::Desc);
    }

    #[test]
    fn test_cursor_decode_accepts_url_safe_alphabet() {
        let json = r#"{"values":{"id":"x","experience":7},"order":"experience ASC"}"#;
        let token = URL_SAFE_NO_PAD.encode(json.as_bytes());
        let cursor = Cursor::decode(&token).unwrap();
        assert_eq!(cursor.value, CursorValue::Integer(7));
    }

    #[test]
    fn test_cursor_decode_invalid_base64() {
        assert_eq!(Cursor::decode("not base64 !!"), Err(Error::CursorInvalidBase64));
        assert_eq!(Cursor::decode(""), Err(Error::CursorInvalidBase64));
    }

    #[test]
    fn test_cursor_decode_invalid_json() {
        assert_eq!(
            Cursor::decode(&b64("not json")),
            Err(Error::CursorInvalidJson)
        );
        assert_eq!(
            Cursor::decode(&b64(r#"{"values":{"id":"x","experience":1}}"#)),
            Err(Error::CursorInvalidJson)
        );
        assert_eq!(
            Cursor::decode(&b64(
                r#"{"values":{"id":"x","experience":1,"like_count":2},"order":"experience ASC"}"#
            )),
            Err(Error::CursorInvalidJson)
        );
    }

    #[test]
    fn test_cursor_decode_missing_values() {
        assert_eq!(
            Cursor::decode(&b64(r#"{"values":{"experience":1},"order":"experience ASC"}"#)),
            Err(Error::CursorMissingValue("id".into()))
        );
        assert_eq!(
            Cursor::decode(&b64(r#"{"values":{"id":"x","like_count":1},"order":"experience ASC"}"#)),
            Err(Error::CursorMissingValue("experience".into()))
        );
    }

    #[test]
    fn test_cursor_decode_rejects_bad_order_and_values() {
        assert!(matches!(
            Cursor::decode(&b64(r#"{"values":{"id":"x","experience":1},"order":"experience"}"#)),
            Err(Error::CursorInvalidOrder(_))
        ));
        assert!(matches!(
            Cursor::decode(&b64(
                r#"{"values":{"id":"x","created_at":12.5},"order":"created_at DESC"}"#
            )),
            Err(Error::CursorInvalidValue { .. })
        ));
        assert!(matches!(
            Cursor::decode(&b64(
                r#"{"values":{"id":"x","review_count":"many"},"order":"review_count DESC"}"#
            )),
            Err(Error::CursorInvalidValue { .. })
        ));
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            Error::InvalidOrder("x".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(Error::CursorInvalidJson.category(), ErrorCategory::Validation);
        assert_eq!(
            Error::MissingSortValue("experience".into()).category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            Error::StatsJoinMissing {
                alias: "stats".into(),
                field: "review_count".into()
            }
            .category(),
            ErrorCategory::Configuration
        );
        assert_eq!(Error::Db("boom".into()).category(), ErrorCategory::Internal);
        assert_eq!(
            Error::CursorEncode("nan".into()).category(),
            ErrorCategory::Internal
        );
        assert_eq!(Error::CursorInvalidBase64.parameter(), Some("cursor"));
        assert_eq!(Error::InvalidOrder("x".into()).parameter(), Some("order"));
    }

    struct Row {
        id: &'static str,
        experience: i64,
        likes: Option<i64>,
    }

    impl CursorRow for Row {
        fn cursor_id(&self) -> String {
            self.id.to_string()
        }
        fn base_value(&self, column: &str) -> Option<CursorValue> {
            (column == "experience").then_some(CursorValue::Integer(self.experience))
        }
        fn stats_value(&self, column: &str) -> Option<CursorValue> {
            match column {
                "like_count" => self.likes.map(CursorValue::Integer),
                _ => None,
            }
        }
    }

    #[test]
    fn test_cursor_row_resolves_through_location() {
        let row = Row {
            id: "a",
            experience: 5,
            likes: None,
        };
        assert_eq!(
            row.value_at(OrderField::Experience.location()),
            Some(CursorValue::Integer(5))
        );
        assert_eq!(row.value_at(OrderField::LikeCount.location()), None);
    }

    #[test]
    fn test_cursor_page_has_next_tracks_cursor() {
        let page: CursorPage<u8> = CursorPage::new(vec![1, 2], Some("abc".into()));
        assert!(page.has_next);
        let page = page.map_items(u32::from).with_count(9);
        assert_eq!(page.items, vec![1u32, 2]);
        assert_eq!(page.count, Some(9));

        let empty: CursorPage<u8> = CursorPage::empty();
        assert!(!empty.has_next);
        let json = serde_json::to_value(&empty).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"items": [], "nextCursor": null, "hasNext": false})
        );
    }
}
