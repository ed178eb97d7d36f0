use cube_core::{CubeState, MoveEngine};

/// Scrambles paired with the facelet string a two-phase solver expects for
/// them
static SCRAMBLES: [[&str; 2]; 8] = [
    ["", "UUUUUUUUURRRRRRRRRFFFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB"],
    [
        "U2 R2 L D2 L F2 B2 U' D' F U R' L2 U2 D L F' B2 D R2",
        "FLLLULFRFRUURRRBBBLDDFFUBRUDFRDDUFLDUFUFLDLBRBDRBBULBD",
    ],
    [
        "F2 U F2 R2 L2 U2 D' L2 U2 D2 F2 B R2 L U D' L' U2 R' L2 F B2 R'",
        "FBLDUUBFUBFDLRUDLRLDRRFFUDRRLFRDULDDLBDBLUUFFFRUBBLBRB",
    ],
    [
        "B' U2 B U2 D R' L' D F B R F' D2 L2 F' R2 L2 F' D2 F2 R2 L2",
        "UFLBURFFLBFBLRRFRRLUUDFUBBDDRRFDDFBBRUULLLLLRDDFUBBUDD",
    ],
    [
        "F U2 F' B' R U2 L U' D' B' R F2 B2 R U2 F2 B2 L F2 U2 D2 R",
        "FLDUUFRLULRLURRUBDDDBRFRBLLDFFUDLRBFUFFFLBBBRBURDBDLDU",
    ],
    [
        "R' L2 U2 L2 U2 B2 R L2 U' D2 R L2 F2 B2 U D F' B2 U D' F2 R U D",
        "DLRBUUBRLUBBLRLBFRLFFBFBUDRLLDUDDDUUFRDRLDFRBUFRUBDFFL",
    ],
    [
        "L' F B2 L D' R' L' U' F2 B U' R2 F' U2 R2 L2 F D2 B' L2 U2",
        "DUUDUBBDUFURLRFBURUBLRFDFBRDRDBDFBFUFRLRLFDLLBLRDBUFLL",
    ],
    [
        "U F2 B2 U B2 U2 D R' L U' D' F' B2 D F2 B U' R2 F' B2 U2 D'",
        "DDFBUFDRDFURFRFULBRURBFDULLBDFFDUBBDLDBBLULLRURFRBLLRU",
    ],
];

#[test_log::test]
fn scrambles_encode_like_a_two_phase_solver() {
    for [scramble, encoding] in SCRAMBLES {
        let mut engine = MoveEngine::default();
        engine.apply_notation(scramble).unwrap();
        assert_eq!(engine.state().canonical_string(), encoding, "{scramble}");
        assert_eq!(
            CubeState::from_canonical(encoding).as_ref(),
            Ok(engine.state())
        );
    }
}
