use shiftkey::codec::BaudotCodec;

#[test]
fn letters_and_figures_round_trip_through_shift_changes() {
    let mut encoder = BaudotCodec::new();
    let text = "RYRYRY CQ CQ CQ DE W1AW W1AW W1AW K";
    let codes = encoder.encode(text);

    let mut decoder = BaudotCodec::new();
    assert_eq!(decoder.decode(&codes), text);
}

#[test]
fn lowercase_input_round_trips_as_uppercase() {
    let mut encoder = BaudotCodec::new();
    let codes = encoder.encode("hello world");

    let mut decoder = BaudotCodec::new();
    assert_eq!(decoder.decode(&codes), "HELLO WORLD");
}

#[test]
fn preamble_codes_are_ltrs_shift_and_decode_to_nothing() {
    let mut encoder = BaudotCodec::new();
    let codes = encoder.encode_with_preamble("DE W1AW", 2);

    let mut decoder = BaudotCodec::new();
    assert_eq!(decoder.decode(&codes), "DE W1AW");
}
