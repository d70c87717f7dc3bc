// Chat-platform boundary: ids, inbound event shapes, and the outbound port.
//
// Palisade never talks to a chat platform directly. An adapter (serenity,
// twilight, ...) translates gateway events into the types here and
// implements `ChatPort` for delivery. Login, gateway wiring, and command
// registration all live on the adapter side.

pub mod port;
pub mod types;
