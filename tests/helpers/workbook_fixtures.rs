//! Workbook and data source documents used across integration tests.

/// A stand-alone data source with one simple postgres connection.
pub const POSTGRES_DATASOURCE: &str = r#"<?xml version='1.0' encoding='utf-8' ?>
<datasource formatted-name='postgres.sales' inline='true' version='18.1'>
  <connection class='postgres' dbname='sales' port='5432' server='db.internal' username='reader'>
    <relation connection='postgres.sales' name='orders' table='[public].[orders]' type='table'/>
    <cols>
      <map key='[Order ID]' value='[orders].[order_id]'/>
      <map key='[Amount]' value='[orders].[amount]'/>
    </cols>
  </connection>
  <column caption='Order ID' datatype='integer' name='[Order ID]' role='dimension' type='ordinal'/>
  <column caption='Amount' datatype='real' name='[Amount]' role='measure' type='quantitative'/>
</datasource>
"#;

/// Data source as some exports write it: `user:` attributes without an
/// `xmlns:user` declaration.
pub const UNDECLARED_PREFIX_DATASOURCE: &str = r#"<?xml version='1.0' encoding='utf-8' ?>
<datasource caption='Targets' inline='true' name='excel.targets' version='18.1'>
  <connection class='excel-direct' filename='targets.xlsx'>
    <relation connection='excel.targets' name='Sheet1$' table='[Sheet1$]' type='table'/>
  </connection>
  <column datatype='string' name='[Region]' role='dimension' type='nominal' user:auto-column='sheet_link'/>
  <group caption='West Coast' name='[Region Set]' name-style='unqualified' user:ui-builder='filter-group'>
    <groupfilter function='union' user:ui-domain='database' user:ui-enumeration='inclusive'>
      <groupfilter function='member' level='[Region]' member='"West"'/>
      <groupfilter function='member' level='[Region]' member='"Pacific"'/>
    </groupfilter>
  </group>
</datasource>
"#;

/// A workbook exercising every extractor.
///
/// Calculation chain: `[Calculation_A]` → `[Calculation_B]` → `[Calculation_C]`,
/// plus `[Calculation_P]` using parameter `[Parameter 1]` (caption `Threshold`).
pub const SALES_WORKBOOK: &str = r#"<?xml version='1.0' encoding='utf-8' ?>
<workbook source-build='2023.1.0' version='18.1' xmlns:user='http://www.tableausoftware.com/xml/user'>
  <datasources>
    <datasource hasconnection='false' inline='true' name='Parameters' version='18.1'>
      <aliases enabled='yes'/>
      <column caption='Threshold' datatype='integer' name='[Parameter 1]' param-domain-type='range' role='measure' type='quantitative' value='100'>
        <calculation class='tableau' formula='100'/>
        <range granularity='10' max='1000' min='0'/>
      </column>
    </datasource>
    <datasource caption='Superstore' inline='true' name='federated.0abc' version='18.1'>
      <connection class='federated'>
        <named-connections>
          <named-connection caption='warehouse.internal' name='postgres.1x2'>
            <connection class='postgres' dbname='superstore' port='5432' server='warehouse.internal'/>
          </named-connection>
        </named-connections>
        <relation join='inner' type='join'>
          <clause type='join'>
            <expression op='='>
              <expression op='[Orders].[Order ID]'/>
              <expression op='[Returns].[Order ID]'/>
            </expression>
          </clause>
          <relation connection='postgres.1x2' name='Orders' table='[public].[orders]' type='table'/>
          <relation connection='postgres.1x2' name='Returns' table='[public].[returns]' type='table'/>
        </relation>
        <relation connection='postgres.1x2' name='Targets by Region' type='text'>SELECT region, target FROM targets</relation>
        <cols>
          <map key='[Order ID]' value='[Orders].[order_id]'/>
          <map key='[Region]' value='[Orders].[region]'/>
          <map key='[Sales]' value='[Orders].[sales]'/>
          <map key='[Profit]' value='[Orders].[profit]'/>
        </cols>
      </connection>
      <extract count='-1' enabled='true' units='records'>
        <connection class='hyper' dbname='Data/Extracts/superstore.hyper'>
          <relation name='Extract' table='[Extract].[Extract]' type='table'/>
          <relation name='Extract' type='text'>SELECT * FROM Extract</relation>
        </connection>
      </extract>
      <column caption='Order ID' datatype='string' name='[Order ID]' role='dimension' type='nominal'/>
      <column caption='Region' datatype='string' name='[Region]' role='dimension' type='nominal'>
        <desc>
          <formatted-text>
            <run>Sales region</run>
            <run>of the customer</run>
          </formatted-text>
        </desc>
      </column>
      <column datatype='real' name='[Sales]' role='measure' type='quantitative'/>
      <column datatype='real' name='[Profit]' role='measure' type='quantitative'/>
      <column caption='Segment' datatype='string' name='[Segment]' role='dimension' type='nominal'>
        <aliases>
          <alias key='"Consumer"' value='Retail'/>
        </aliases>
      </column>
      <column caption='Adjusted Margin' datatype='real' name='[Calculation_A]' role='measure' type='quantitative'>
        <calculation class='tableau' formula='[Calculation_B] + 1'/>
      </column>
      <column caption='Double Margin' datatype='real' name='[Calculation_B]' role='measure' type='quantitative'>
        <calculation class='tableau' formula='[Calculation_C] * 2'/>
      </column>
      <column caption='Margin' datatype='real' default-format='p0.0%' name='[Calculation_C]' role='measure' type='quantitative'>
        <calculation class='tableau' formula='SUM([Profit]) / SUM([Sales])'/>
      </column>
      <column caption='Above Threshold' datatype='boolean' name='[Calculation_P]' role='dimension' type='nominal'>
        <calculation class='tableau' formula='SUM([Sales]) &gt; [Parameters].[Parameter 1]'/>
      </column>
      <group caption='Top Regions' name='[Top Regions]' name-style='unqualified' user:ui-builder='filter-group'>
        <groupfilter count='3' end='top' function='end' units='records' user:ui-marker='end' user:ui-top-by-field='true'>
          <groupfilter direction='DESC' expression='SUM([Sales])' function='order' user:ui-marker='order'>
            <groupfilter function='level-members' level='[Region]' user:ui-enumeration='all' user:ui-marker='enumerate'/>
          </groupfilter>
        </groupfilter>
      </group>
    </datasource>
  </datasources>
  <worksheets>
    <worksheet name='Sales by Region'>
      <layout-options>
        <caption>
          <formatted-text>
            <run>Ã†Sales and margin</run>
            <run>by region</run>
          </formatted-text>
        </caption>
      </layout-options>
      <table>
        <view>
          <datasources>
            <datasource caption='Superstore' name='federated.0abc'/>
            <datasource name='Parameters'/>
          </datasources>
          <datasource-dependencies datasource='Parameters'>
            <column caption='Threshold' datatype='integer' name='[Parameter 1]' param-domain-type='range' role='measure' type='quantitative' value='100'>
              <calculation class='tableau' formula='100'/>
            </column>
          </datasource-dependencies>
          <datasource-dependencies datasource='federated.0abc'>
            <column caption='Region' datatype='string' name='[Region]' role='dimension' type='nominal'/>
            <column datatype='real' name='[Sales]' role='measure' type='quantitative'/>
            <column caption='Adjusted Margin' datatype='real' name='[Calculation_A]' role='measure' type='quantitative'>
              <calculation class='tableau' formula='[Calculation_B] + 1'/>
            </column>
            <column-instance column='[Region]' derivation='None' name='[none:Region:nk]' pivot='key' type='nominal'/>
            <column-instance column='[Sales]' derivation='Sum' name='[sum:Sales:qk]' pivot='key' type='quantitative'/>
          </datasource-dependencies>
        </view>
      </table>
    </worksheet>
  </worksheets>
  <dashboards>
    <dashboard name='Executive Summary'>
      <style>
        <style-rule element='quick-filter'>
          <format attr='title' field='[federated.0abc].[none:Region:nk]' value='Pick a region'/>
        </style-rule>
      </style>
      <zones>
        <zone h='100000' id='1' type='layout-basic' w='100000' x='0' y='0'>
          <zone h='80000' id='2' name='Sales by Region' w='80000' x='0' y='0'/>
          <zone h='20000' id='3' name='Sales by Region' param='[federated.0abc].[none:Region:nk]' type='filter' w='20000' x='80000' y='0'/>
          <zone h='20000' id='4' name='Sales by Region' param='[federated.0abc].[sum:Sales:qk]' type='filter' w='20000' x='80000' y='20000'/>
          <zone h='20000' id='5' type='text' w='20000' x='80000' y='40000'/>
        </zone>
      </zones>
    </dashboard>
  </dashboards>
</workbook>
"#;
