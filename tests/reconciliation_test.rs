//! 商品・画像照合の統合テスト
//!
//! ファイル名解析 → グループ化 → 照合 の一連の流れを検証

use catalog_image_common::{
    equivalent, group_images, match_products, normalize, parse_filename, GroupKey, ImageEntry,
    ImageGroups, MatchKind, MatchOptions, ParseFailure, Product, DEFAULT_IMAGE_URL,
};

fn groups_from(filenames: &[&str]) -> ImageGroups {
    group_images(
        filenames
            .iter()
            .filter_map(|f| ImageEntry::from_listing(f, &format!("https://cdn.example/{}", f)).ok()),
    )
}

/// `_F` 画像が代表画像になる
#[test]
fn test_primary_image_first() {
    let groups = groups_from(&["PD760221-OFF-1.jpg", "PD760221-OFF-2_F.jpg"]);

    let group = groups.get(&GroupKey::new("PD760221", "OFF")).expect("グループがない");
    assert_eq!(group.image_url(), Some("https://cdn.example/PD760221-OFF-2_F.jpg"));
    assert_eq!(group.gallery().len(), 2);
}

/// COGNAC の商品が COG の画像グループに一致する
#[test]
fn test_cognac_matches_cog_group() {
    let groups = groups_from(&["CV866522-COG-1.jpg"]);
    let products = vec![Product::new("CV866522", "COGNAC")];

    let results = match_products(&products, &groups, &MatchOptions::default()).unwrap();
    assert_eq!(results[0].match_kind, MatchKind::Alias);
    assert_eq!(results[0].image_url, "https://cdn.example/CV866522-COG-1.jpg");
}

/// "BLACK LOGO" は BLACK に正規化され、BLA グループに一致する
#[test]
fn test_black_logo_matches_bla_group() {
    assert_eq!(normalize("BLACK LOGO"), "BLACK");

    let groups = groups_from(&["A1-BLA-1.jpg"]);
    let results = match_products(&[Product::new("A1", "BLACK LOGO")], &groups, &MatchOptions::default()).unwrap();
    assert!(results[0].is_matched());
    assert_eq!(results[0].matched_color.as_ref().unwrap(), "BLA");
}

/// 解析できないファイル名はどのグループにも入らない
#[test]
fn test_bad_filename_is_excluded() {
    assert_eq!(parse_filename("BADFILE.jpg"), Err(ParseFailure::MissingSegments(1)));

    let groups = groups_from(&["BADFILE.jpg", "A1-RED-1.jpg"]);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups.image_count(), 1);
}

/// 該当なしは既定画像と空のギャラリー
#[test]
fn test_unmatched_product_gets_default_image() {
    let groups = groups_from(&["A1-RED-1.jpg"]);
    let results = match_products(&[Product::new("Q9", "TEAL")], &groups, &MatchOptions::default()).unwrap();

    assert_eq!(results[0].image_url, DEFAULT_IMAGE_URL);
    assert!(results[0].gallery.is_empty());
    assert_eq!(results[0].match_kind, MatchKind::Unmatched);
}

/// 代表画像とそれ以外が混在するグループは必ず代表画像が先頭
#[test]
fn test_primary_ordering_holds_for_mixed_groups() {
    let names = [
        "M1-RED-3.jpg",
        "M1-RED-1_f.png",
        "M1-RED-2.jpg",
        "M2-NAV-1.jpg",
        "M2-NAV-F.webp",
        "M2-NAV-2.jpg",
    ];
    let groups = groups_from(&names);

    for (_, group) in &groups {
        let first = group.entries.first().unwrap();
        assert!(first.is_primary, "{} の先頭が代表画像でない", group.key);
    }
}

/// 同値判定は登録された方向と逆方向の検索のみ（推移はしない）
#[test]
fn test_equivalence_lookup_directions() {
    assert!(equivalent(&normalize("COG"), &normalize("COGNAC")));
    assert!(equivalent(&normalize("COGNAC"), &normalize("COG")));
    assert!(!equivalent(&normalize("CREAM"), &normalize("IVORY")));
}

/// 正規化は冪等
#[test]
fn test_normalize_idempotent_samples() {
    for input in ["Black Logo", "off-white", "אוף וויט", "cognac os", "  ", "GREY02"] {
        let once = normalize(input);
        assert_eq!(normalize(once.as_str()), once);
    }
}

/// 同じ入力で2回照合すると同じ結果
#[test]
fn test_rerun_produces_identical_output() {
    let names = ["A1-OFF-1.jpg", "A1-OFFWHITE-1_F.jpg", "A1-BLA-1.jpg", "B1-COG-2.jpg", "B1-COG-1.jpg"];
    let products = vec![
        Product::new("A1", "cream"),
        Product::new("A1", "Black"),
        Product::new("B1", "Cognac"),
        Product::new("C1", "red"),
    ];
    let options = MatchOptions::default();

    let first = match_products(&products, &groups_from(&names), &options).unwrap();
    let second = match_products(&products, &groups_from(&names), &options).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
