use std::cell::RefCell;
use std::rc::Rc;

use shiftkey::{
    CharacterEvent, ChannelsChangedEvent, DemodulatorObserver, MultiChannelRtty, RttyConfig,
    RttyModulator, SignalChangeEvent,
};

mod support;
use support::Rng;

#[derive(Default)]
struct Recorded {
    characters: Vec<CharacterEvent>,
}

struct RecordingObserver(Rc<RefCell<Recorded>>);

impl DemodulatorObserver for RecordingObserver {
    fn on_character(&mut self, event: CharacterEvent) {
        self.0.borrow_mut().characters.push(event);
    }
    fn on_signal_change(&mut self, _event: SignalChangeEvent) {}
    fn on_channels_changed(&mut self, _event: ChannelsChangedEvent) {}
}

#[test]
fn four_speakers_decode_independently_on_their_own_channels() {
    let frequencies = [1500.0, 1700.0, 1900.0, 2100.0];
    let messages = ["DE W1AW K", "DE N0CALL K", "DE K1ABC K", "DE W9XYZ K"];
    let sample_rate = 48_000;

    let mut rng = Rng::new(7);
    let mut mixed: Vec<f32> = Vec::new();

    for (freq, text) in frequencies.iter().zip(messages.iter()) {
        let config = RttyConfig::new(45.45, *freq, 170.0, sample_rate).unwrap();
        let mut modulator = RttyModulator::new(config);
        let start_offset_ms = rng.next_f64() * 500.0;

        let mut stream = modulator.generate_idle(start_offset_ms / 1000.0);
        stream.extend(modulator.encode_with_idle(text, 200.0, 300.0));
        stream.iter_mut().for_each(|s| *s *= 0.25);

        if stream.len() > mixed.len() {
            mixed.resize(stream.len(), 0.0);
        }
        for (m, s) in mixed.iter_mut().zip(stream.iter()) {
            *m += s;
        }
    }

    let config = RttyConfig::new(45.45, frequencies[0], 170.0, sample_rate).unwrap();
    let mut bank = MultiChannelRtty::new(config, &frequencies);
    let recorded = Rc::new(RefCell::new(Recorded::default()));
    bank.set_observer(Box::new(RecordingObserver(recorded.clone())));

    bank.process(&mixed);

    for (freq, text) in frequencies.iter().zip(messages.iter()) {
        let decoded_on_channel: String = recorded
            .borrow()
            .characters
            .iter()
            .filter(|e| (e.frequency_hz - freq).abs() < 1.0)
            .map(|e| e.character)
            .collect();
        assert!(
            decoded_on_channel.contains(text),
            "channel {freq} expected {text:?}, decoded {decoded_on_channel:?}"
        );
    }
}

#[test]
fn removed_channel_stops_reporting_characters() {
    let frequencies = [1955.0, 2125.0];
    let config = RttyConfig::standard();
    let mut bank = MultiChannelRtty::new(config, &frequencies);

    let ids: Vec<_> = bank.channels().map(|c| c.id).collect();
    bank.remove_channel(ids[0]);
    assert_eq!(bank.channels().count(), 1);
    assert_eq!(bank.channels().next().unwrap().id, ids[1]);
}
