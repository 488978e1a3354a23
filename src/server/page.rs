//! Embedded viewer page
//!
//! Single static HTML page served at `/`: the live feed image, camera
//! switch buttons and a small control pad speaking the control socket
//! protocol. Embedded in the binary so the server ships as one file.

/// The viewer page
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>camcast</title>
<style>
  body { font-family: sans-serif; margin: 2em; background: #202225; color: #eee; }
  img { border: 1px solid #444; max-width: 100%; }
  button { margin: 0.2em; padding: 0.5em 1.2em; }
  #pad { margin-top: 1em; }
  #log { margin-top: 1em; font-family: monospace; white-space: pre-line;
         max-height: 10em; overflow-y: auto; color: #9c9; }
</style>
</head>
<body>
<h1>Live feed</h1>
<img src="/video" alt="camera stream">
<div>
  <button onclick="switchCamera(0)">Camera 0</button>
  <button onclick="switchCamera(1)">Camera 1</button>
  <span id="status"></span>
</div>
<div id="pad">
  <button onclick="send('f')">Forward</button>
  <button onclick="send('b')">Back</button>
  <button onclick="send('l')">Left</button>
  <button onclick="send('r')">Right</button>
  <input id="value" type="range" min="0" max="100" value="50"
         onchange="send('!S' + this.value)">
  <button onclick="requestStop()">Stop feed</button>
</div>
<div id="log"></div>
<script>
  const log = (line) => {
    const el = document.getElementById('log');
    el.textContent += line + '\n';
    el.scrollTop = el.scrollHeight;
  };

  const proto = location.protocol === 'https:' ? 'wss://' : 'ws://';
  const socket = new WebSocket(proto + location.host + '/control');
  socket.onopen = () => log('control connected');
  socket.onclose = () => log('control closed');
  socket.onmessage = (event) => {
    const frame = JSON.parse(event.data);
    if (frame.type === 'message') {
      log('> ' + frame.data);
    } else if (frame.type === 'disconnect_confirmed') {
      log('feed stopped by server');
    }
  };

  function send(data) {
    socket.send(JSON.stringify({ type: 'message', data: data }));
  }

  function requestStop() {
    socket.send(JSON.stringify({ type: 'disconnect_request' }));
  }

  function switchCamera(id) {
    fetch('/switch_camera/' + id)
      .then((response) => response.json())
      .then((result) => {
        document.getElementById('status').textContent = result.message;
      });
  }
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_wires_the_endpoints() {
        assert!(INDEX_HTML.contains(r#"src="/video""#));
        assert!(INDEX_HTML.contains("/switch_camera/"));
        assert!(INDEX_HTML.contains("/control"));
        assert!(INDEX_HTML.contains("disconnect_request"));
    }
}
