//! End-to-end: JSON annotation bundle -> pipeline -> PENMAN notation.

use amr_rs::{export, Pipeline, Sentence};

const WSJ_STYLE: &str = r#"{
    "words": [
        ["Rudolph", {"PartOfSpeech": "NNP"}],
        ["Agnew", {"PartOfSpeech": "NNP"}],
        ["was", {"PartOfSpeech": "VBD"}],
        ["named", {"PartOfSpeech": "VBN"}],
        ["director", {"PartOfSpeech": "NN"}]
    ],
    "stanford_dep": [
        {"gov_idx": 1, "dep_idx": 0, "rel": "nn"},
        {"gov_idx": 3, "dep_idx": 1, "rel": "nsubjpass"},
        {"gov_idx": 3, "dep_idx": 2, "rel": "auxpass"},
        {"gov_idx": -1, "dep_idx": 3, "rel": "root"},
        {"gov_idx": 3, "dep_idx": 4, "rel": "xcomp"}
    ],
    "bbn_ne": [
        [0, 1, "Rudolph Agnew", "PERSON", "", "", false]
    ],
    "prop": [
        {
            "baseform": "name",
            "roleset": "name.01",
            "args": [
                ["rel", "3:0", 3, 3, "named"],
                ["ARG1", "1:1", 0, 1, "Rudolph Agnew"],
                ["ARG2", "4:0", 4, 4, "director"]
            ]
        }
    ]
}"#;

#[test]
fn test_json_to_penman() {
    let sentence = Sentence::from_json("wsj_0002.0", WSJ_STYLE).unwrap();
    let annotation = Pipeline::standard().annotate(&sentence).unwrap();
    assert!(annotation.issues.is_empty());

    let penman = export::to_penman_string(&annotation.graph).unwrap();

    // one connected fragment rooted at the predicate
    assert!(penman.starts_with("(v2 / name-01"));
    assert!(penman.contains(":ARG1 (v0 / person-FALLBACK"));
    assert!(penman.contains(":name (v1 / name"));
    assert!(penman.contains(":op1 \"Rudolph\""));
    assert!(penman.contains(":op2 \"Agnew\""));
    assert!(penman.contains(":ARG2 (v3 / director"));
}

#[test]
fn test_disconnected_fragments_print_separately() {
    let json = r#"{
        "words": [
            ["Chinese", {}],
            ["exports", {}],
            ["reached", {}],
            ["$", {}],
            ["1.9", {}],
            ["million", {"NormalizedNamedEntityTag": "$1900000.0"}]
        ],
        "stanford_dep": [
            {"gov_idx": 1, "dep_idx": 0, "rel": "amod"},
            {"gov_idx": 2, "dep_idx": 1, "rel": "nsubj"},
            {"gov_idx": -1, "dep_idx": 2, "rel": "root"},
            {"gov_idx": 5, "dep_idx": 3, "rel": "$"},
            {"gov_idx": 5, "dep_idx": 4, "rel": "number"},
            {"gov_idx": 2, "dep_idx": 5, "rel": "dobj"}
        ],
        "bbn_ne": [
            [0, 0, "Chinese", "NORP", "NATIONALITY", "", false],
            [3, 5, "$ 1.9 million", "MONEY", "", "<NUMEX TYPE=\"MONEY\">", false]
        ]
    }"#;

    let sentence = Sentence::from_json("s", json).unwrap();
    let annotation = Pipeline::standard().annotate(&sentence).unwrap();

    let penman = export::to_penman_string(&annotation.graph).unwrap();

    // no proposition connects the two entities: two roots
    assert!(penman.contains("(v0 / country-FALLBACK"));
    assert!(penman.contains(":op1 \"China\""));
    assert!(penman.contains("(v2 / monetary-quantity"));
    assert!(penman.contains(":quant 1900000"));
    assert!(penman.contains(":unit (v3 / dollar)"));
}
