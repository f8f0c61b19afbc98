use crate::view::Tab;

pub fn render_index(tab: Tab) -> String {
    let tab = match tab {
        Tab::Overview => "overview",
        Tab::Analytics => "analytics",
        Tab::Campaigns => "campaigns",
    };
    INDEX_HTML.replace("{{TAB}}", tab)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Campaign Health Dashboard</title>
  <script src="https://cdn.jsdelivr.net/npm/chart.js@4"></script>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2f7;
      --bg-2: #cfd9ea;
      --ink: #1f2933;
      --accent: #3b82f6;
      --accent-2: #1e293b;
      --healthy: #22c55e;
      --warning: #f59e0b;
      --critical: #ef4444;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(30, 41, 59, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #e2e8f0 60%, #f8fafc 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(1080px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f6b7a;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(30, 41, 59, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7b8794;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
    }

    .healthy { color: var(--healthy); }
    .warning { color: var(--warning); }
    .critical { color: var(--critical); }

    .alerts {
      display: grid;
      gap: 8px;
    }

    .alert {
      border-radius: 14px;
      padding: 12px 16px;
      background: rgba(239, 68, 68, 0.1);
      color: #991b1b;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(30, 41, 59, 0.08);
      border-radius: 999px;
      width: fit-content;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 16px;
      font-weight: 600;
      cursor: pointer;
    }

    .tab {
      background: transparent;
      color: #52606d;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(30, 41, 59, 0.12);
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
      gap: 16px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(30, 41, 59, 0.08);
    }

    [hidden] {
      display: none !important;
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 16px;
      overflow: hidden;
    }

    th, td {
      padding: 10px 12px;
      text-align: left;
      border-bottom: 1px solid rgba(30, 41, 59, 0.06);
      font-size: 0.92rem;
    }

    form.create {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(140px, 1fr));
      gap: 10px;
    }

    input {
      padding: 10px 12px;
      border-radius: 12px;
      border: 1px solid rgba(30, 41, 59, 0.2);
      font: inherit;
    }

    .btn-primary {
      background: var(--accent);
      color: white;
    }

    .btn-ghost {
      background: rgba(30, 41, 59, 0.08);
      color: var(--accent-2);
      padding: 6px 12px;
    }

    pre.diagnosis {
      white-space: pre-wrap;
      background: white;
      border-radius: 16px;
      padding: 16px;
      margin: 0;
    }

    .status {
      min-height: 1.2em;
      color: #52606d;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Campaign Health Dashboard</h1>
      <p class="subtitle">Campaign metrics, health classification and backend diagnostics.</p>
    </header>

    <section class="panel">
      <div class="stat"><span class="label">Healthy</span><span id="healthy-count" class="value healthy">0</span></div>
      <div class="stat"><span class="label">Warning</span><span id="warning-count" class="value warning">0</span></div>
      <div class="stat"><span class="label">Critical</span><span id="critical-count" class="value critical">0</span></div>
      <div class="stat"><span class="label">Refreshed</span><span id="refreshed" class="value">--</span></div>
    </section>

    <section class="alerts" id="alerts"></section>

    <div class="tabs" role="tablist">
      <button class="tab" type="button" data-tab="overview" role="tab">Overview</button>
      <button class="tab" type="button" data-tab="analytics" role="tab">Analytics</button>
      <button class="tab" type="button" data-tab="campaigns" role="tab">Campaigns</button>
    </div>

    <section class="charts" data-view="overview">
      <div class="chart-card"><canvas id="health-chart"></canvas></div>
      <div class="chart-card"><canvas id="benchmark-chart"></canvas></div>
    </section>

    <section class="charts" data-view="analytics">
      <div class="chart-card"><canvas id="ctr-chart"></canvas></div>
      <div class="chart-card"><canvas id="conversion-chart"></canvas></div>
      <div class="chart-card"><canvas id="budget-chart"></canvas></div>
    </section>

    <section data-view="campaigns">
      <form class="create" id="create-form">
        <input name="name" placeholder="Name" required />
        <input name="budget" type="number" min="0" step="0.01" placeholder="Budget" required />
        <input name="impressions" type="number" min="0" placeholder="Impressions" required />
        <input name="clicks" type="number" min="0" placeholder="Clicks" required />
        <input name="conversions" type="number" min="0" placeholder="Conversions" required />
        <button class="btn-primary" type="submit">Add campaign</button>
      </form>
      <p><button class="btn-ghost" type="button" id="seed-btn">Load demo campaigns</button></p>
      <pre class="diagnosis" id="diagnosis" hidden></pre>
    </section>

    <table>
      <thead>
        <tr><th>Name</th><th>Budget</th><th>CTR</th><th>CPC</th><th>Conv.</th><th>Health</th><th></th></tr>
      </thead>
      <tbody id="campaign-rows"></tbody>
    </table>

    <div class="status" id="status"></div>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const rowsEl = document.getElementById('campaign-rows');
    const alertsEl = document.getElementById('alerts');
    const diagnosisEl = document.getElementById('diagnosis');
    const tabs = Array.from(document.querySelectorAll('.tab'));
    const views = Array.from(document.querySelectorAll('[data-view]'));
    const live = new Map();

    let activeTab = '{{TAB}}';

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const flash = (message, type) => {
      setStatus(message, type);
      setTimeout(() => setStatus('', ''), 2500);
    };

    const fmt = (value, prefix = '', suffix = '') =>
      typeof value === 'number' ? `${prefix}${value.toFixed(2)}${suffix}` : '--';

    const escapeHtml = (text) =>
      String(text).replace(/[&<>"']/g, (c) => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[c]));

    const request = async (url, options) => {
      const res = await fetch(url, options);
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      return res;
    };

    const slotCanvas = {
      health_distribution: 'health-chart',
      metrics_benchmark: 'benchmark-chart',
      ctr_by_campaign: 'ctr-chart',
      conversion_by_campaign: 'conversion-chart',
      budget_vs_clicks: 'budget-chart'
    };

    const drawCharts = (charts) => {
      for (const [slot, chart] of live) {
        chart.destroy();
        live.delete(slot);
      }
      charts.forEach(({ slot, config }) => {
        const canvas = document.getElementById(slotCanvas[slot]);
        if (canvas) {
          live.set(slot, new Chart(canvas, { ...config, options: { responsive: true } }));
        }
      });
    };

    const renderRows = (campaigns) => {
      rowsEl.innerHTML = campaigns
        .map((c) => `
          <tr>
            <td>${escapeHtml(c.name)}</td>
            <td>${fmt(c.budget, '$')}</td>
            <td>${fmt(c.ctr, '', '%')}</td>
            <td>${fmt(c.cpc, '$')}</td>
            <td>${fmt(c.conversion_rate, '', '%')}</td>
            <td class="${c.health}">${c.health}${c.metrics_valid ? '' : ' (invalid metrics)'}</td>
            <td>
              <button class="btn-ghost" data-action="diagnose" data-id="${c.id}">Diagnose</button>
              <a class="btn-ghost" href="/api/report/${c.id}">Report</a>
              <button class="btn-ghost" data-action="delete" data-id="${c.id}">Delete</button>
            </td>
          </tr>`)
        .join('');
    };

    const renderAlerts = (alerts) => {
      alertsEl.innerHTML = alerts
        .map((a) => `<div class="alert">${escapeHtml(a.campaign_name)}: score ${a.health_score}/100, ${a.issues_found} issue(s), top: ${escapeHtml(a.top_issue)}</div>`)
        .join('');
    };

    const refresh = async () => {
      const res = await request(`/api/dashboard?tab=${activeTab}`);
      const data = await res.json();
      document.getElementById('healthy-count').textContent = data.summary.healthy_count;
      document.getElementById('warning-count').textContent = data.summary.warning_count;
      document.getElementById('critical-count').textContent = data.summary.critical_count;
      document.getElementById('refreshed').textContent = new Date(data.refreshed_at).toLocaleTimeString();
      renderAlerts(data.alerts);
      renderRows(data.campaigns);
      drawCharts(data.charts);
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => button.classList.toggle('active', button.dataset.tab === tab));
      views.forEach((view) => (view.hidden = view.dataset.view !== tab));
      refresh().catch((err) => flash(err.message, 'error'));
    };

    const showDiagnosis = async (id) => {
      const res = await request(`/api/diagnose/${id}`);
      const d = await res.json();
      const issues = d.issues
        .map((issue) => `[${issue.severity.toUpperCase()}] ${issue.title}\n  ${issue.description}\n  Causes: ${issue.root_causes.slice(0, 3).join('; ')}`)
        .join('\n\n');
      diagnosisEl.textContent = `${d.summary} (score ${d.health_score}/100, ${d.status})\n\n${issues || 'No issues detected.'}\n\nRecommendations:\n${d.recommendations.map((r, i) => `${i + 1}. ${r}`).join('\n')}`;
      diagnosisEl.hidden = false;
      setActiveTab('campaigns');
    };

    rowsEl.addEventListener('click', (event) => {
      const button = event.target.closest('button[data-action]');
      if (!button) {
        return;
      }
      const id = button.dataset.id;
      if (button.dataset.action === 'diagnose') {
        showDiagnosis(id).catch((err) => flash(err.message, 'error'));
      } else if (button.dataset.action === 'delete') {
        request(`/api/campaigns/${id}`, { method: 'DELETE' })
          .then(() => refresh())
          .then(() => flash('Campaign deleted', 'ok'))
          .catch((err) => flash(err.message, 'error'));
      }
    });

    document.getElementById('create-form').addEventListener('submit', (event) => {
      event.preventDefault();
      const form = new FormData(event.target);
      const body = {
        name: form.get('name'),
        budget: Number(form.get('budget')),
        impressions: Number(form.get('impressions')),
        clicks: Number(form.get('clicks')),
        conversions: Number(form.get('conversions'))
      };
      request('/api/campaigns', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify(body)
      })
        .then(() => {
          event.target.reset();
          return refresh();
        })
        .then(() => flash('Campaign created', 'ok'))
        .catch((err) => flash(err.message, 'error'));
    });

    document.getElementById('seed-btn').addEventListener('click', () => {
      request('/api/seed', { method: 'POST' })
        .then((res) => res.json())
        .then((data) => {
          flash(data.message, 'ok');
          return refresh();
        })
        .catch((err) => flash(err.message, 'error'));
    });

    tabs.forEach((button) => {
      button.addEventListener('click', () => setActiveTab(button.dataset.tab));
    });

    setActiveTab(activeTab);
  </script>
</body>
</html>
"#;
